use color_eyre::eyre::Result;
use multiagent_search::SearchCounts;

use super::AgentArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Decide {
    #[clap(flatten)]
    agent: AgentArgs,
}

impl Decide {
    pub(crate) fn run(self) -> Result<()> {
        let game = self.agent.initial_state()?;
        let factory = self.agent.factory()?;
        let evaluation = self.agent.evaluation();
        let counts = SearchCounts::default();

        let result = factory.explain(evaluation, self.agent.options(), &game, &counts);

        print!("{game}");
        println!();

        match result.action {
            Some(action) => println!(
                "{} with the {} evaluation chose {action}",
                factory.name(),
                evaluation.kind()
            ),
            None => println!("{} has no action from this state", factory.name()),
        }
        println!("{}", result.to_text_tree());
        println!(
            "Expansions: {}, Evaluations: {}, Cutoffs: {}",
            counts.expansions(),
            counts.evaluations(),
            counts.cutoffs()
        );

        Ok(())
    }
}
