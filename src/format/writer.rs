use super::*;
use crate::model::*;

fn row<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl std::fmt::Display for Cgs {
    /// Write the flat format. Reading the output back yields an equal model.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", TRANSITION)?;
        for cells in self.matrix() {
            writeln!(f, "{}", row(cells))?;
        }
        if !self.unknown().is_empty() {
            writeln!(f, "{}", UNKNOWN)?;
            for line in self.unknown() {
                writeln!(f, "{}", line)?;
            }
        }
        writeln!(f, "{}", NAME_STATE)?;
        writeln!(f, "{}", row(self.states()))?;
        writeln!(f, "{}", INITIAL_STATE)?;
        writeln!(f, "{}", self.name(self.initial()))?;
        writeln!(f, "{}", PROPOSITIONS)?;
        writeln!(f, "{}", row(self.props()))?;
        writeln!(f, "{}", LABELLING)?;
        for bits in self.labels() {
            writeln!(f, "{}", row(bits.iter().map(|b| *b as u8)))?;
        }
        writeln!(f, "{}", AGENTS)?;
        writeln!(f, "{}", self.agents())?;
        if let Some(costs) = self.costs() {
            if let Some(resource) = costs.resource() {
                writeln!(f, "{}", RESOURCE)?;
                writeln!(f, "{}", resource)?;
            }
            if !costs.table().is_empty() {
                writeln!(f, "{}", COSTS)?;
                for entries in costs.table() {
                    writeln!(f, "{}", row(entries))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = "\
Transition
II AI,BI
IB *
Unkown_Transition_by
0 t1
0 0
Name_State
q0 q1
Initial_State
q1
Atomic_propositions
win
Labelling
0
1
Number_of_agents
2
Resource
5
Actions_Costs_from_Transition
00 12,30
02 00
";

    #[test]
    fn reproduces_input() {
        let cgs = MODEL.parse::<Cgs>().expect("valid model");
        assert_eq!(cgs.to_string(), MODEL);
    }

    #[test]
    fn reread_equal() {
        let cgs = MODEL.parse::<Cgs>().expect("valid model");
        let again = cgs.to_string().parse::<Cgs>().expect("written model reads back");
        assert_eq!(cgs, again);
    }
}
