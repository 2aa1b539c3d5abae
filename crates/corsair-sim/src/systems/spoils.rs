//! Prize money and standing changes for sinking or taking a ship.

use corsair_core::components::Cargo;
use corsair_core::enums::Faction;
use corsair_core::state::PlayerLedger;

/// Gold and standing awarded for one kind of victory.
#[derive(Debug, Clone, Copy)]
pub struct Bounty {
    pub gold: i64,
    /// (reputation, infamy) when holding a letter of marque against the victim.
    pub with_marque: (i64, i64),
    /// (reputation, infamy) otherwise.
    pub without_marque: (i64, i64),
}

/// Pay out a bounty. Returns the (reputation, infamy) change applied.
pub fn award(ledger: &mut PlayerLedger, victim: Faction, bounty: &Bounty) -> (i64, i64) {
    let (reputation, infamy) = if ledger.holds_marque_against(victim) {
        bounty.with_marque
    } else {
        bounty.without_marque
    };
    ledger.gold += bounty.gold;
    ledger.reputation += reputation;
    ledger.infamy += infamy;
    (reputation, infamy)
}

/// Move a prize's hold into the player's stores. Provisions go to the
/// ledger, treasure into the player's own hold.
pub fn transfer_cargo(ledger: &mut PlayerLedger, player_cargo: &mut Cargo, loot: &Cargo) {
    ledger.supplies.food += loot.food;
    ledger.supplies.rum += loot.rum;
    ledger.supplies.ammunition += loot.ammunition;
    player_cargo.treasure += loot.treasure;
}
