use super::*;
use crate::Agent;

/// Optional resource bound with per-transition action costs.
///
/// The cost matrix is aligned cell for cell with the transition matrix.
/// Each cell lists one cost entry per joint action of the matching
/// transition cell, separated by commas, and each entry has one digit
/// per agent. An action's cost is read from the first transition where
/// the agent plays it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Costs {
    resource: Option<u32>,
    table: Vec<Vec<String>>,
}

impl Costs {
    pub fn new(resource: Option<u32>, table: Vec<Vec<String>>) -> Self {
        Self { resource, table }
    }
    pub fn resource(&self) -> Option<u32> {
        self.resource
    }
    pub fn table(&self) -> &[Vec<String>] {
        &self.table
    }
    /// Cost of `action` for `agent`; actions without a listed cost are free.
    pub fn cost(&self, matrix: &[Vec<Cell>], agent: Agent, action: char) -> u32 {
        matrix
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, c)| (i, j, c)))
            .flat_map(|(i, j, cell)| {
                cell.joints()
                    .iter()
                    .enumerate()
                    .map(move |(k, joint)| (i, j, k, joint))
            })
            .find(|(_, _, _, joint)| joint.of(agent) == Some(Move::Act(action)))
            .and_then(|(i, j, k, _)| self.entry(i, j, k))
            .and_then(|entry| entry.chars().nth(agent - 1))
            .and_then(|digit| digit.to_digit(10))
            .unwrap_or(0)
    }
    fn entry(&self, i: usize, j: usize, k: usize) -> Option<&str> {
        let cell = self.table.get(i)?.get(j)?;
        cell.split(crate::ALTERNATIVE)
            .nth(k)
            .or_else(|| cell.split(crate::ALTERNATIVE).next())
    }
}
