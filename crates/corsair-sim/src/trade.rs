//! Port economy and the purse: provisioning, trade goods, the shipyard,
//! the governor's office, and buried treasure.
//!
//! Every operation either applies in full and returns
//! `TradeOutcome::Completed` with the change in gold, or returns the
//! reason it was refused and changes nothing.

use hecs::World;

use corsair_core::commands::ShipyardOffer;
use corsair_core::components::{Battery, Cargo, Crew, Hull, PlayerShip, ShipInfo};
use corsair_core::constants::*;
use corsair_core::enums::{Faction, GovernorAttitude, ShipClass, SupplyKind};
use corsair_core::events::GameEvent;
use corsair_core::outcomes::TradeOutcome;
use corsair_core::state::{BuriedTreasure, TradeGood};
use corsair_core::types::{Position, ShipId};

use crate::report::Feedback;
use crate::session::Session;
use crate::world_setup::find_player;

/// A hull for sale at the shipyard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipyardListing {
    pub class: ShipClass,
    pub price: i64,
    pub crew: u32,
    pub max_crew: u32,
    pub cannons: u32,
    pub speed: f64,
    pub max_health: f64,
    pub cargo_max: u32,
}

pub fn shipyard_listing(offer: ShipyardOffer) -> ShipyardListing {
    let (class, price, crew, max_crew, cannons, speed, max_health, cargo_max) = match offer {
        ShipyardOffer::Sloop => (ShipClass::Sloop, 5_000, 20, 40, 8, 9.0, 250.0, 100),
        ShipyardOffer::Brigantine => (ShipClass::Brigantine, 12_000, 50, 80, 16, 7.0, 400.0, 160),
        ShipyardOffer::Frigate => (ShipClass::Frigate, 25_000, 150, 220, 32, 6.0, 700.0, 240),
        ShipyardOffer::Galleon => (ShipClass::Galleon, 50_000, 300, 420, 48, 4.0, 1000.0, 400),
    };
    ShipyardListing {
        class,
        price,
        crew,
        max_crew,
        cannons,
        speed,
        max_health,
        cargo_max,
    }
}

/// Prize-court value of a captured ship.
pub fn prize_value(cannons: u32, max_health: f64) -> i64 {
    (500.0 + cannons as f64 * 100.0 + max_health / 2.0).round() as i64
}

fn afford(gold: i64, cost: i64) -> Result<(), TradeOutcome> {
    if gold < cost {
        Err(TradeOutcome::InsufficientGold {
            needed: cost,
            available: gold,
        })
    } else {
        Ok(())
    }
}

fn require_port(session: &Session) -> Result<&str, TradeOutcome> {
    session.current_port.as_deref().ok_or(TradeOutcome::NotInPort)
}

pub fn buy_supplies(session: &mut Session, kind: SupplyKind, amount: u32) -> TradeOutcome {
    let price = match require_port(session) {
        Ok(port_id) => match session.find_port(port_id) {
            Some(port) => port.prices.price_of(kind),
            None => return TradeOutcome::NotInPort,
        },
        Err(refusal) => return refusal,
    };
    if amount == 0 {
        return TradeOutcome::Nothing;
    }
    let cost = price * amount as i64;
    if let Err(refusal) = afford(session.ledger.gold, cost) {
        return refusal;
    }

    session.ledger.gold -= cost;
    *session.ledger.supplies.get_mut(kind) += amount;
    log::info!("Bought {amount} {kind:?} for {cost} gold");
    TradeOutcome::Completed { gold_delta: -cost }
}

pub fn sell_treasure(world: &mut World, session: &mut Session, amount: u32) -> TradeOutcome {
    if let Err(refusal) = require_port(session) {
        return refusal;
    }
    let Some(player) = find_player(world) else {
        return TradeOutcome::Nothing;
    };
    let Ok(cargo) = world.query_one_mut::<&mut Cargo>(player) else {
        return TradeOutcome::Nothing;
    };
    let to_sell = amount.min(cargo.treasure);
    if to_sell == 0 {
        return TradeOutcome::Nothing;
    }
    let value = to_sell as i64 * TREASURE_SALE_PRICE;
    cargo.treasure -= to_sell;
    session.ledger.gold += value;
    TradeOutcome::Completed { gold_delta: value }
}

pub fn buy_goods(session: &mut Session, good_id: &str, quantity: u32, price: i64) -> TradeOutcome {
    if quantity == 0 || price <= 0 {
        return TradeOutcome::Nothing;
    }
    let hold = &session.ledger.cargo;
    let Some(loaded) = hold.current.checked_add(quantity).filter(|n| *n <= hold.max) else {
        return TradeOutcome::InsufficientCargoSpace {
            needed: quantity,
            free: hold.free_space(),
        };
    };
    let Some(cost) = price.checked_mul(i64::from(quantity)) else {
        return TradeOutcome::InsufficientGold {
            needed: i64::MAX,
            available: session.ledger.gold,
        };
    };
    if let Err(refusal) = afford(session.ledger.gold, cost) {
        return refusal;
    }
    let hold = &mut session.ledger.cargo;

    match hold.goods.iter_mut().find(|g| g.id == good_id) {
        Some(good) => good.quantity += quantity,
        None => hold.goods.push(TradeGood {
            id: good_id.to_string(),
            name: good_id.to_string(),
            quantity,
        }),
    }
    hold.current = loaded;
    session.ledger.gold -= cost;
    TradeOutcome::Completed { gold_delta: -cost }
}

pub fn sell_goods(session: &mut Session, good_id: &str, quantity: u32) -> TradeOutcome {
    let hold = &mut session.ledger.cargo;
    let held = hold.quantity_of(good_id);
    let Some(index) = hold.goods.iter().position(|g| g.id == good_id) else {
        return TradeOutcome::NotHeld {
            requested: quantity,
            held: 0,
        };
    };
    if held < quantity {
        return TradeOutcome::NotHeld {
            requested: quantity,
            held,
        };
    }

    let revenue = (GOODS_BASE_PRICE * quantity as f64 * GOODS_SALE_FACTOR).round() as i64;
    if held == quantity {
        hold.goods.remove(index);
    } else {
        hold.goods[index].quantity -= quantity;
    }
    hold.current = hold.current.saturating_sub(quantity);
    session.ledger.gold += revenue;
    TradeOutcome::Completed { gold_delta: revenue }
}

/// Patch the hull back to full strength at 2 gold per point.
pub fn repair_ship(world: &mut World, session: &mut Session) -> TradeOutcome {
    let Some(player) = find_player(world) else {
        return TradeOutcome::Nothing;
    };
    let Ok(hull) = world.query_one_mut::<&mut Hull>(player) else {
        return TradeOutcome::Nothing;
    };
    let cost = ((hull.max_health - hull.health) * REPAIR_COST_PER_HP).round() as i64;
    if let Err(refusal) = afford(session.ledger.gold, cost) {
        return refusal;
    }
    session.ledger.gold -= cost;
    hull.health = hull.max_health;
    TradeOutcome::Completed { gold_delta: -cost }
}

/// Trade up to a new hull. Position, heading, flag, and cargo carry over.
pub fn buy_ship(world: &mut World, session: &mut Session, offer: ShipyardOffer) -> TradeOutcome {
    let listing = shipyard_listing(offer);
    if let Err(refusal) = afford(session.ledger.gold, listing.price) {
        return refusal;
    }
    let Some(player) = find_player(world) else {
        return TradeOutcome::Nothing;
    };
    let Ok((info, hull, crew, battery)) =
        world.query_one_mut::<(&mut ShipInfo, &mut Hull, &mut Crew, &mut Battery)>(player)
    else {
        return TradeOutcome::Nothing;
    };

    info.class = listing.class;
    info.speed = listing.speed;
    info.max_cargo = listing.cargo_max;
    *hull = Hull {
        health: listing.max_health,
        max_health: listing.max_health,
        last_hit_at: None,
    };
    *crew = Crew {
        count: listing.crew.min(listing.max_crew),
        max_count: listing.max_crew,
        morale: crew.morale.min(80.0),
        max_morale: crew.max_morale,
    };
    *battery = Battery {
        cannons: listing.cannons,
        ..Battery::default()
    };

    let hold = &mut session.ledger.cargo;
    hold.max = listing.cargo_max;
    hold.current = hold.current.min(listing.cargo_max);
    session.ledger.gold -= listing.price;
    log::info!("Purchased {offer:?} for {} gold", listing.price);
    TradeOutcome::Completed {
        gold_delta: -listing.price,
    }
}

/// Sell a captured ship to the prize court.
pub fn sell_prize(session: &mut Session, ship_id: ShipId) -> TradeOutcome {
    let ledger = &mut session.ledger;
    let Some(index) = ledger.captured_ships.iter().position(|s| s.id == ship_id) else {
        return TradeOutcome::UnknownItem;
    };
    let prize = ledger.captured_ships.remove(index);
    let value = prize_value(prize.cannons, prize.max_health);
    ledger.gold += value;
    ledger.reputation += PRIZE_REPUTATION_BONUS;
    log::info!("Prize {ship_id} sold for {value} gold");
    TradeOutcome::Completed { gold_delta: value }
}

/// Buy the governor's goodwill. Bribes accumulate on the governor.
pub fn bribe_governor(session: &mut Session, amount: i64) -> TradeOutcome {
    let port_id = match require_port(session) {
        Ok(port_id) => port_id.to_string(),
        Err(refusal) => return refusal,
    };
    if amount <= 0 {
        return TradeOutcome::Nothing;
    }
    if let Err(refusal) = afford(session.ledger.gold, amount) {
        return refusal;
    }
    let Some(port) = session.find_port_mut(&port_id) else {
        return TradeOutcome::NotInPort;
    };
    port.governor.attitude = GovernorAttitude::Neutral;
    port.governor.bribes += amount;
    session.ledger.gold -= amount;
    TradeOutcome::Completed { gold_delta: -amount }
}

pub fn purchase_letter_of_marque(session: &mut Session, faction: Faction) -> TradeOutcome {
    if !faction.issues_marque() {
        return TradeOutcome::UnknownItem;
    }
    if let Err(refusal) = afford(session.ledger.gold, LETTER_OF_MARQUE_COST) {
        return refusal;
    }
    session.ledger.gold -= LETTER_OF_MARQUE_COST;
    session.ledger.letters_of_marque.insert(faction);
    log::info!("Letter of marque purchased against {faction:?}");
    TradeOutcome::Completed {
        gold_delta: -LETTER_OF_MARQUE_COST,
    }
}

/// Pay the crew their share. Wages come out of the purse even when it
/// cannot cover them; only a full payout lifts morale and standing.
pub fn divide_plunder(world: &mut World, session: &mut Session) -> TradeOutcome {
    let Some((_player, crew)) = world
        .query_mut::<(&PlayerShip, &mut Crew)>()
        .into_iter()
        .next()
        .map(|(_, components)| components)
    else {
        return TradeOutcome::Nothing;
    };

    let ledger = &mut session.ledger;
    let wages = crew.count as i64 * CREW_WAGE;
    let can_pay = ledger.gold >= wages;
    let before = ledger.gold;
    ledger.gold = (ledger.gold - wages).max(0);
    if can_pay {
        crew.morale = (crew.morale + PLUNDER_MORALE_BONUS).min(crew.max_morale);
        ledger.reputation += PLUNDER_REPUTATION_BONUS;
    }
    ledger.infamy = (ledger.infamy - PLUNDER_INFAMY_RELIEF).max(0);
    TradeOutcome::Completed {
        gold_delta: ledger.gold - before,
    }
}

/// Bury `amount` gold at the ship's position, stamped with today's date.
pub fn bury_treasure(world: &World, session: &mut Session, amount: i64, feedback: &mut Feedback) -> TradeOutcome {
    if amount <= 0 {
        return TradeOutcome::Nothing;
    }
    if let Err(refusal) = afford(session.ledger.gold, amount) {
        return refusal;
    }
    let Some(position) = world
        .query::<(&PlayerShip, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos)
    else {
        return TradeOutcome::Nothing;
    };

    let id = session.next_treasure_id;
    session.next_treasure_id += 1;
    session.ledger.gold -= amount;
    session.ledger.buried_treasure.push(BuriedTreasure {
        id,
        position,
        gold: amount,
        buried: session.date,
    });
    log::info!("Buried {amount} gold at current location");
    feedback.emit(GameEvent::TreasureBuried {
        gold: amount,
        position,
    });
    TradeOutcome::Completed { gold_delta: -amount }
}
