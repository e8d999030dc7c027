//! View models built from service responses
//!
//! Everything here is pure so the display rules can be tested without a
//! terminal.

use crate::api::{PokemonPayload, StatSlot};
use crate::state::{BattleView, Combatant, Creature, StatLine, TEAM_CAPACITY};

/// `special-attack` -> `special attack`
pub fn stat_label(name: &str) -> String {
    name.replace('-', " ")
}

/// Sum of every stat value, saturating at `u32::MAX`
pub fn total_power(stats: &[StatSlot]) -> u32 {
    stats
        .iter()
        .fold(0u32, |acc, slot| acc.saturating_add(slot.base_stat))
}

pub fn total_power_label(power: u32) -> String {
    format!("Total Power: {power}")
}

/// `(n/6)` using the size reported by the service
pub fn team_counter(team_size: usize) -> String {
    format!("({team_size}/{TEAM_CAPACITY})")
}

/// `"<message> <result>"`, always with exactly one separating space
pub fn battle_message(message: &str, result: &str) -> String {
    format!("{message} {result}")
}

/// Roster card for a freshly caught creature at position `index`
pub fn creature(index: usize, pokemon: &PokemonPayload) -> Creature {
    let slots = pokemon.stats.as_deref().unwrap_or_default();
    Creature {
        index,
        name: pokemon.name.clone().unwrap_or_default(),
        sprite: pokemon.front_sprite().map(str::to_string),
        stats: slots
            .iter()
            .map(|slot| StatLine {
                label: stat_label(&slot.stat.name),
                value: slot.base_stat,
            })
            .collect(),
        power: total_power(slots),
    }
}

/// Battle panel side; tolerates a missing or partial payload
pub fn combatant(pokemon: Option<&PokemonPayload>) -> Combatant {
    let Some(pokemon) = pokemon else {
        return Combatant::default();
    };
    let fallback = Combatant::default();
    Combatant {
        sprite: pokemon
            .front_sprite()
            .filter(|sprite| !sprite.is_empty())
            .map(str::to_string)
            .unwrap_or(fallback.sprite),
        name: pokemon
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or(fallback.name),
        power: pokemon.stats.as_deref().map(total_power).unwrap_or(0),
    }
}

pub fn battle_view(
    message: &str,
    result: &str,
    player: Option<&PokemonPayload>,
    opponent: Option<&PokemonPayload>,
) -> BattleView {
    BattleView {
        message: battle_message(message, result),
        player: combatant(player),
        opponent: combatant(opponent),
    }
}

/// Short label for a sprite reference (its file name)
pub fn sprite_label(sprite: &str) -> &str {
    sprite.rsplit('/').next().unwrap_or(sprite)
}
