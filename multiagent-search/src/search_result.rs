use std::fmt::{Debug, Display};

use text_trees::StringTreeNode;

use crate::Score;

#[derive(Debug, Clone, PartialEq)]
/// This is returned from a top-level search
/// It contains the chosen score and action, and the value we computed for every root action
pub struct SearchResult<Action> {
    /// The value of the root node
    pub score: Score,
    /// The action that produced [SearchResult::score]
    ///
    /// This is `None` when the root was a cutoff (terminal or depth 0) or the maximizer had no
    /// legal actions. Callers must not act on such a result.
    pub action: Option<Action>,
    /// Every root action in legal-action order, with the value computed for it
    ///
    /// Alpha-beta may stop refining an action once it is known to be worse than the best one, so
    /// for alpha-beta only the chosen action's value is guaranteed to be exact. The others are
    /// upper bounds.
    pub options: Vec<(Action, Score)>,
}

impl<Action> SearchResult<Action>
where
    Action: Copy + Eq + Debug,
{
    /// This returns a visual representation of the root decision
    /// It shows the chosen score, and the value of each root action with the chosen one marked
    pub fn to_text_tree(&self) -> String
    where
        Action: Display,
    {
        let chosen = match self.action {
            Some(action) => format!("{} -> {}", self.score, action),
            None => format!("{} (no action)", self.score),
        };
        let mut node = StringTreeNode::new(chosen);
        for (action, score) in &self.options {
            let marker = if Some(*action) == self.action { "*" } else { " " };
            node.push_node(StringTreeNode::new(format!(
                "{}{} {}",
                marker, action, score
            )));
        }

        format!("{}", node)
    }
}
