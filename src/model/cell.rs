use super::*;

/// Contents of one (source, target) entry of the transition matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    /// Unconditional self-loop at the source state.
    Wildcard,
    Joint(Vec<JointAction>),
}

impl Cell {
    /// Parse `0`, `*` or a comma-separated list of joint actions.
    pub fn parse(text: &str, width: usize) -> Result<Self, ModelError> {
        match text {
            crate::EMPTY => Ok(Self::Empty),
            "*" => Ok(Self::Wildcard),
            text => text
                .split(crate::ALTERNATIVE)
                .map(|label| JointAction::parse(label, width))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Joint),
        }
    }
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Wildcard => false,
            Self::Joint(joints) => joints.is_empty(),
        }
    }
    pub fn joints(&self) -> &[JointAction] {
        match self {
            Self::Joint(joints) => joints,
            _ => &[],
        }
    }
    /// Keep the joint actions accepted by `keep`.
    /// Wildcards are not attributable to any agent and survive unchanged.
    pub fn retain<F>(&self, keep: F) -> Self
    where
        F: Fn(&JointAction) -> bool,
    {
        match self {
            Self::Empty => Self::Empty,
            Self::Wildcard => Self::Wildcard,
            Self::Joint(joints) => {
                let kept = joints
                    .iter()
                    .filter(|j| keep(j))
                    .cloned()
                    .collect::<Vec<_>>();
                match kept.is_empty() {
                    true => Self::Empty,
                    false => Self::Joint(kept),
                }
            }
        }
    }
    /// Add a joint action unless already listed.
    pub fn push(&mut self, joint: JointAction) {
        match self {
            Self::Joint(joints) if joints.contains(&joint) => {}
            Self::Joint(joints) => joints.push(joint),
            Self::Empty => *self = Self::Joint(vec![joint]),
            Self::Wildcard => {}
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "{}", crate::EMPTY),
            Self::Wildcard => write!(f, "{}", crate::WILDCARD),
            Self::Joint(joints) => write!(
                f,
                "{}",
                joints
                    .iter()
                    .map(|j| j.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_show() {
        assert_eq!(Cell::parse("0", 2), Ok(Cell::Empty));
        assert_eq!(Cell::parse("*", 2), Ok(Cell::Wildcard));
        let cell = Cell::parse("AC,BI", 2).expect("valid cell");
        assert_eq!(cell.joints().len(), 2);
        assert_eq!(cell.to_string(), "AC,BI");
        assert!(Cell::parse("AC,B", 2).is_err());
    }

    #[test]
    fn retain_empties() {
        let cell = Cell::parse("AC,BI", 2).expect("valid cell");
        let kept = cell.retain(|j| j.of(1) == Some(Move::Act('B')));
        assert_eq!(kept.to_string(), "BI");
        assert_eq!(cell.retain(|_| false), Cell::Empty);
        assert_eq!(Cell::Wildcard.retain(|_| false), Cell::Wildcard);
    }
}
