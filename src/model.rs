//! # Domain Model: Places, Categories and Search Filters
//!
//! This module defines the core data structures for gourmet-compass:
//! [`Place`], [`Category`] and the search filter enums.
//!
//! ## Categories
//!
//! A category is a user-named, ordered bucket of saved places. Three
//! reserved categories always exist and can never be deleted:
//!
//! | id        | display name   |
//! |-----------|----------------|
//! | `home`    | 🏠 家裡附近     |
//! | `work`    | 🏢 公司周邊     |
//! | `default` | 📂 未分類       |
//!
//! A place is "favorited" when it appears in the item list of *any*
//! category — favorite status is collection-wide, not per-category.
//! Within a category, item order is insertion order and doubles as
//! display order.
//!
//! `collapsed` is pure display state. It is persisted with the rest of
//! the category so the favorites view reopens the way it was left, but
//! it carries no domain meaning.
//!
//! ## Filters
//!
//! The filter enums mirror the choices offered in the search screen.
//! Each variant knows its user-facing label (the Traditional-Chinese
//! strings the original audience sees); the prompt layer owns the
//! longer wire-contract text derived from them.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A saved or cited place. The `uri` is both the identity used for
/// favorite bookkeeping and the external map link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub uri: String,
    pub title: String,
}

impl Place {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub items: Vec<Place>,
    // Older blobs predate the collapsed flag.
    #[serde(default)]
    pub collapsed: bool,
}

pub const HOME_ID: &str = "home";
pub const WORK_ID: &str = "work";
pub const DEFAULT_ID: &str = "default";

const HOME_NAME: &str = "🏠 家裡附近";
const WORK_NAME: &str = "🏢 公司周邊";
const DEFAULT_NAME: &str = "📂 未分類";

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
            collapsed: false,
        }
    }

    pub fn home() -> Self {
        Self::new(HOME_ID, HOME_NAME)
    }

    pub fn work() -> Self {
        Self::new(WORK_ID, WORK_NAME)
    }

    pub fn unsorted() -> Self {
        Self::new(DEFAULT_ID, DEFAULT_NAME)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.items.iter().any(|item| item.uri == uri)
    }
}

/// True for the three always-present categories that refuse deletion.
pub fn is_reserved(id: &str) -> bool {
    matches!(id, HOME_ID | WORK_ID | DEFAULT_ID)
}

/// The collection a fresh profile starts with.
pub fn default_categories() -> Vec<Category> {
    vec![Category::home(), Category::work(), Category::unsorted()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Cuisine {
    #[default]
    Any,
    Chinese,
    Japanese,
    Korean,
    HongKong,
    American,
    Italian,
    FastFood,
    Drinks,
    Cafe,
}

impl Cuisine {
    pub fn label(&self) -> &'static str {
        match self {
            Cuisine::Any => "全部",
            Cuisine::Chinese => "中式",
            Cuisine::Japanese => "日式",
            Cuisine::Korean => "韓式",
            Cuisine::HongKong => "港式",
            Cuisine::American => "美式",
            Cuisine::Italian => "義式",
            Cuisine::FastFood => "速食",
            Cuisine::Drinks => "飲料",
            Cuisine::Cafe => "咖啡廳",
        }
    }
}

/// Four discrete budget tiers, labelled with their NT$ ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PriceTier {
    #[default]
    Budget,
    Moderate,
    MidRange,
    HighEnd,
}

impl PriceTier {
    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::Budget => "$ 1~200",
            PriceTier::Moderate => "$ 201~400",
            PriceTier::MidRange => "$ 401~600",
            PriceTier::HighEnd => "$ 600+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TravelMode {
    #[default]
    Walking,
    Riding,
}

impl TravelMode {
    pub fn label(&self) -> &'static str {
        match self {
            TravelMode::Walking => "步行",
            TravelMode::Riding => "騎車",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MealTime {
    /// Bind the search to the current wall clock and demand open-now.
    #[default]
    Now,
    Morning,
    Noon,
    Evening,
}

/// How many recommendations the report should commit to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Picks {
    /// Exactly one top pick.
    #[default]
    Single,
    /// Three to five options to choose from.
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchFilters {
    pub cuisine: Cuisine,
    pub price: PriceTier,
    pub mode: TravelMode,
    pub time: MealTime,
    pub picks: Picks,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single device fix: where we are and how sure the device is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub coordinates: Coordinates,
    pub accuracy_m: f64,
}

/// Where to center the search. Device coordinates bias the maps
/// retrieval directly; a manual address is resolved by the provider
/// from the prompt text alone.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationContext {
    Device(Coordinates),
    Manual(String),
}
