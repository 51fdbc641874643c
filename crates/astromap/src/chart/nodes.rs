//! Lunar node pair and the life theme read from the north node's sign.

use crate::chart::types::{LunarNodes, NodeTheme};
use crate::ephemeris::types::{Planet, PlanetPosition};
use crate::zodiac::ZodiacSign;

/// (label, description) per north-node sign, Aries first.
const NODE_THEMES: [(&str, &str); 12] = [
    ("The Pioneer", "Learning to act on your own initiative instead of waiting for approval."),
    ("The Builder", "Growing through patience, simplicity and trust in what you can make last."),
    ("The Messenger", "Opening up to curiosity, questions and many points of view."),
    ("The Nurturer", "Letting feelings, family and emotional safety guide your choices."),
    ("The Creator", "Stepping into self-expression, play and being seen for who you are."),
    ("The Healer", "Finding meaning in service, daily craft and practical care."),
    ("The Diplomat", "Discovering yourself through partnership, balance and fairness."),
    ("The Alchemist", "Transforming through intimacy, shared resources and letting go."),
    ("The Explorer", "Seeking truth through travel, study and a wider philosophy of life."),
    ("The Architect", "Taking responsibility for a long-term purpose and public role."),
    ("The Visionary", "Contributing to community, friendship and ideas bigger than yourself."),
    ("The Mystic", "Trusting intuition, compassion and the quiet spaces between plans."),
];

/// Theme for a north node sign.
pub fn node_theme(north_node_sign: ZodiacSign) -> NodeTheme {
    let (label, description) = NODE_THEMES[north_node_sign.index() as usize];
    NodeTheme {
        label: label.to_string(),
        description: description.to_string(),
    }
}

/// Node pair with its theme. The south node is carried as computed, not re-derived.
pub fn lunar_nodes(north: PlanetPosition, south: PlanetPosition) -> LunarNodes {
    debug_assert_eq!(north.planet, Planet::NorthNode);
    debug_assert_eq!(south.planet, Planet::SouthNode);
    LunarNodes {
        north,
        south,
        theme: node_theme(north.sign),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_follows_north_node_sign() {
        let nodes = lunar_nodes(
            PlanetPosition::new(Planet::NorthNode, 95.0, 0.0, -0.053),
            PlanetPosition::new(Planet::SouthNode, 275.0, 0.0, -0.053),
        );
        assert_eq!(nodes.theme.label, "The Nurturer");
        assert!(nodes.north.retrograde);
    }

    #[test]
    fn every_sign_has_a_distinct_theme() {
        let labels: std::collections::HashSet<String> = crate::zodiac::ALL_SIGNS
            .iter()
            .map(|&s| node_theme(s).label)
            .collect();
        assert_eq!(labels.len(), 12);
    }
}
