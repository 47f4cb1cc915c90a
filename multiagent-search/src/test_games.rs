//! Synthetic game trees with known leaf values, shared by the strategy tests

use std::{collections::HashMap, rc::Rc};

use crate::{
    game::{AdversaryCountGame, AgentIndex, LegalActionsGame, SimulableGame, VictorDeterminableGame},
    Score,
};

/// A game where the state is the list of actions taken so far
///
/// Actions are indices `0..branching[agent]`. Leaf values are looked up by path, and any path
/// without an explicit value scores `default`.
#[derive(Debug, Clone)]
pub(crate) struct TreeGame {
    adversaries: usize,
    branching: Vec<usize>,
    path: Vec<usize>,
    values: Rc<HashMap<Vec<usize>, Score>>,
    terminals: Rc<HashMap<Vec<usize>, bool>>,
    default: Score,
}

impl TreeGame {
    /// Every agent has `branching` actions and every leaf scores `value`
    pub(crate) fn constant(adversaries: usize, branching: usize, value: Score) -> Self {
        Self::new(vec![branching; adversaries + 1]).with_default(value)
    }

    /// `branching[i]` is the number of actions agent `i` has at every node
    pub(crate) fn new(branching: Vec<usize>) -> Self {
        assert!(!branching.is_empty(), "the maximizer needs a branching factor");

        Self {
            adversaries: branching.len() - 1,
            branching,
            path: vec![],
            values: Default::default(),
            terminals: Default::default(),
            default: 0.0,
        }
    }

    pub(crate) fn with_default(mut self, default: Score) -> Self {
        self.default = default;
        self
    }

    /// Assign `values` to every path of `plies` full plies, in lexicographic path order
    pub(crate) fn with_leaves(mut self, plies: usize, values: &[Score]) -> Self {
        let paths = self.full_paths(plies);
        assert_eq!(paths.len(), values.len(), "one value per leaf is required");

        let mut map = (*self.values).clone();
        map.extend(paths.into_iter().zip(values.iter().copied()));
        self.values = Rc::new(map);
        self
    }

    pub(crate) fn with_value(mut self, path: &[usize], value: Score) -> Self {
        Rc::make_mut(&mut self.values).insert(path.to_vec(), value);
        self
    }

    /// Mark the state reached by `path` as a win (`true`) or a loss (`false`)
    pub(crate) fn with_terminal(mut self, path: &[usize], win: bool) -> Self {
        Rc::make_mut(&mut self.terminals).insert(path.to_vec(), win);
        self
    }

    pub(crate) fn won(self) -> Self {
        let path = self.path.clone();
        self.with_terminal(&path, true)
    }

    pub(crate) fn lost(self) -> Self {
        let path = self.path.clone();
        self.with_terminal(&path, false)
    }

    pub(crate) fn path(&self) -> &[usize] {
        &self.path
    }

    pub(crate) fn leaf_value(&self) -> Score {
        self.values
            .get(&self.path)
            .copied()
            .unwrap_or(self.default)
    }

    fn agent_at(&self, step: usize) -> AgentIndex {
        step % (self.adversaries + 1)
    }

    fn full_paths(&self, plies: usize) -> Vec<Vec<usize>> {
        let steps = plies * (self.adversaries + 1);
        let mut paths = vec![vec![]];
        for step in 0..steps {
            let branching = self.branching[self.agent_at(step)];
            paths = paths
                .into_iter()
                .flat_map(|path| {
                    (0..branching).map(move |action| {
                        let mut next = path.clone();
                        next.push(action);
                        next
                    })
                })
                .collect();
        }
        paths
    }
}

impl LegalActionsGame for TreeGame {
    type Action = usize;

    fn legal_actions(&self, agent: AgentIndex) -> Vec<usize> {
        (0..self.branching[agent]).collect()
    }
}

impl SimulableGame for TreeGame {
    fn next_state(&self, agent: AgentIndex, action: usize) -> Self {
        assert_eq!(
            agent,
            self.agent_at(self.path.len()),
            "agents must move in round-robin order"
        );
        assert!(action < self.branching[agent]);

        let mut next = self.clone();
        next.path.push(action);
        next
    }
}

impl VictorDeterminableGame for TreeGame {
    fn is_win(&self) -> bool {
        self.terminals.get(&self.path) == Some(&true)
    }

    fn is_lose(&self) -> bool {
        self.terminals.get(&self.path) == Some(&false)
    }
}

impl AdversaryCountGame for TreeGame {
    fn adversary_count(&self) -> usize {
        self.adversaries
    }
}

/// Brute force minimax straight from the definition, with no shared code with the strategies
pub(crate) fn brute_force_minimax(game: &TreeGame, max_depth: usize) -> Score {
    fn value(game: &TreeGame, agent: AgentIndex, depth: usize, max_depth: usize) -> Score {
        if game.is_over() || depth > max_depth {
            return game.leaf_value();
        }
        let actions = game.legal_actions(agent);
        if actions.is_empty() {
            return game.leaf_value();
        }

        let (next_agent, next_depth) = if agent == game.adversary_count() {
            (0, depth + 1)
        } else {
            (agent + 1, depth)
        };
        let children = actions
            .into_iter()
            .map(|a| value(&game.next_state(agent, a), next_agent, next_depth, max_depth));

        if agent == 0 {
            children.fold(Score::NEG_INFINITY, Score::max)
        } else {
            children.fold(Score::INFINITY, Score::min)
        }
    }

    value(game, 0, 1, max_depth)
}
