//! Shared state and nodes for state_graph integration tests.

use async_trait::async_trait;
use researchgraph::{AgentError, GraphState, Node};

/// Running balance plus the log of nodes that touched it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    pub balance: i64,
    pub log: Vec<String>,
}

/// One posting: which node, how much.
#[derive(Clone, Debug, PartialEq)]
pub struct Posting {
    pub node: String,
    pub amount: i64,
}

impl GraphState for Ledger {
    type Update = Posting;

    fn apply(&mut self, update: Posting) {
        self.balance += update.amount;
        self.log.push(update.node);
    }
}

/// Adds a fixed amount to the balance.
pub struct AddNode {
    id: String,
    amount: i64,
}

impl AddNode {
    pub fn new(id: &str, amount: i64) -> Self {
        Self {
            id: id.to_string(),
            amount,
        }
    }
}

#[async_trait]
impl Node<Ledger> for AddNode {
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, _state: &Ledger) -> Result<Posting, AgentError> {
        Ok(Posting {
            node: self.id.clone(),
            amount: self.amount,
        })
    }
}

/// Always fails.
pub struct FailNode;

#[async_trait]
impl Node<Ledger> for FailNode {
    fn id(&self) -> &str {
        "fail"
    }

    async fn run(&self, _state: &Ledger) -> Result<Posting, AgentError> {
        Err(AgentError::ExecutionFailed("ledger closed".into()))
    }
}
