use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Unassigned,
    Villager,
    Mafia,
    Cop,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Unassigned => write!(f, "unassigned"),
            Role::Villager => write!(f, "villager"),
            Role::Mafia => write!(f, "mafia"),
            Role::Cop => write!(f, "cop"),
        }
    }
}
