//! Domain types shared by the classifier, the row parsers and the web layer

use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Arc;

/// One card entry from the bulk card feed
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCardRecord {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: String,
    #[serde(default)]
    pub desc: String,
    pub atk: Option<i64>,
    pub def: Option<i64>,
    pub level: Option<u32>,
    pub scale: Option<u32>,
    pub linkval: Option<u32>,
    pub linkmarkers: Option<Vec<String>>,
    pub race: Option<String>,
    pub attribute: Option<String>,
    pub archetype: Option<String>,
    /// `None` when the feed has no printing list at all for this card
    pub card_sets: Option<Vec<SetPrinting>>,
    #[serde(default)]
    pub card_images: Vec<ImageRef>,
}

/// A release of a card in one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPrinting {
    #[serde(default)]
    pub set_name: String,
    pub set_code: String,
    #[serde(default)]
    pub set_rarity: String,
    #[serde(default)]
    pub set_rarity_code: String,
    #[serde(default)]
    pub set_price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: u64,
    pub image_url: String,
    #[serde(default)]
    pub image_url_small: String,
}

/// Competitive legality of a card
///
/// On the wire a tier is its copy limit: 0 forbidden, 1 limited,
/// 2 semi-limited, 3 unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegalityTier {
    Forbidden,
    Limited,
    SemiLimited,
    Unlimited,
}

impl LegalityTier {
    /// Parse the legality column of the banlist sheet (case-insensitive)
    pub fn from_sheet_text(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "forbidden" => Some(LegalityTier::Forbidden),
            "limited" => Some(LegalityTier::Limited),
            "semi-limited" => Some(LegalityTier::SemiLimited),
            "unlimited" => Some(LegalityTier::Unlimited),
            _ => None,
        }
    }

    /// Maximum copies allowed in a deck
    pub fn max_copies(self) -> u32 {
        match self {
            LegalityTier::Forbidden => 0,
            LegalityTier::Limited => 1,
            LegalityTier::SemiLimited => 2,
            LegalityTier::Unlimited => 3,
        }
    }
}

impl Serialize for LegalityTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.max_copies())
    }
}

/// A card of the legal pool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atk: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub def: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkmarkers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archetype: Option<String>,
    pub sets: Vec<SetPrinting>,
    pub images: Vec<ImageRef>,
    pub legality: LegalityTier,
}

impl Card {
    /// Promote a raw feed record into the pool at the given tier
    pub fn from_raw(raw: RawCardRecord, legality: LegalityTier) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            card_type: raw.card_type,
            desc: raw.desc,
            atk: raw.atk,
            def: raw.def,
            level: raw.level,
            scale: raw.scale,
            linkval: raw.linkval,
            linkmarkers: raw.linkmarkers,
            race: raw.race,
            attribute: raw.attribute,
            archetype: raw.archetype,
            sets: raw.card_sets.unwrap_or_default(),
            images: raw.card_images,
            legality,
        }
    }
}

/// Card name -> card, the natural key shared by every source
pub type CardIndex = HashMap<String, Arc<Card>>;

/// One row of the banlist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegalityEntry {
    pub id: u64,
    pub card: Arc<Card>,
    pub legality: String,
    pub remark: String,
    pub notes: String,
}

/// The banlist, bucketed by tier
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalityTable {
    pub forbidden: Vec<LegalityEntry>,
    pub limited: Vec<LegalityEntry>,
    pub semi_limited: Vec<LegalityEntry>,
    pub unlimited: Vec<LegalityEntry>,
}

impl LegalityTable {
    pub fn bucket_mut(&mut self, tier: LegalityTier) -> &mut Vec<LegalityEntry> {
        match tier {
            LegalityTier::Forbidden => &mut self.forbidden,
            LegalityTier::Limited => &mut self.limited,
            LegalityTier::SemiLimited => &mut self.semi_limited,
            LegalityTier::Unlimited => &mut self.unlimited,
        }
    }

    pub fn bucket(&self, tier: LegalityTier) -> &[LegalityEntry] {
        match tier {
            LegalityTier::Forbidden => &self.forbidden,
            LegalityTier::Limited => &self.limited,
            LegalityTier::SemiLimited => &self.semi_limited,
            LegalityTier::Unlimited => &self.unlimited,
        }
    }

    pub fn len(&self) -> usize {
        self.forbidden.len() + self.limited.len() + self.semi_limited.len() + self.unlimited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A card granted legality outside its printing history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionEntry {
    pub id: u64,
    pub card: Arc<Card>,
    pub set_code: String,
    pub release_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A named block of the exception sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceptionGroup {
    pub name: String,
    pub cards: Vec<ExceptionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecklistEntry {
    pub quantity: u32,
    pub card: Arc<Card>,
}

/// A tournament decklist
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decklist {
    pub name: String,
    pub description: String,
    #[serde(rename = "imgURL")]
    pub image_url: String,
    pub main_deck: Vec<DecklistEntry>,
    pub extra_deck: Vec<DecklistEntry>,
    /// Never filled from the sheet format
    pub side_deck: Vec<DecklistEntry>,
}

impl Decklist {
    /// Total copies in the main deck, saturating at `u32::MAX`
    pub fn main_deck_count(&self) -> u32 {
        self.main_deck
            .iter()
            .fold(0u32, |total, e| total.saturating_add(e.quantity))
    }
}

/// Result of one successful build
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub card_index: CardIndex,
    pub decklists: Vec<Decklist>,
    pub legality_table: LegalityTable,
    pub exception_groups: Vec<ExceptionGroup>,
}

impl Snapshot {
    pub fn card(&self, name: &str) -> Option<&Arc<Card>> {
        self.card_index.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_card_deserializes_from_feed_json() {
        let json = r#"{
            "id": 46986414,
            "name": "Dark Magician",
            "type": "Normal Monster",
            "frameType": "normal",
            "desc": "The ultimate wizard in terms of attack and defense.",
            "atk": 2500,
            "def": 2100,
            "level": 7,
            "race": "Spellcaster",
            "attribute": "DARK",
            "archetype": "Dark Magician",
            "card_sets": [
                {
                    "set_name": "Legend of Blue Eyes White Dragon",
                    "set_code": "LOB-005",
                    "set_rarity": "Ultra Rare",
                    "set_rarity_code": "(UR)",
                    "set_price": "0"
                }
            ],
            "card_images": [
                {
                    "id": 46986414,
                    "image_url": "https://example.com/46986414.jpg",
                    "image_url_small": "https://example.com/46986414_small.jpg"
                }
            ]
        }"#;

        let raw: RawCardRecord = serde_json::from_str(json).unwrap();
        assert_eq!(raw.name, "Dark Magician");
        assert_eq!(raw.card_type, "Normal Monster");
        assert_eq!(raw.atk, Some(2500));
        assert_eq!(raw.scale, None);
        let sets = raw.card_sets.as_ref().unwrap();
        assert_eq!(sets[0].set_code, "LOB-005");
        assert_eq!(raw.card_images.len(), 1);
    }

    #[test]
    fn raw_card_without_printings() {
        let json = r#"{"id": 1, "name": "Token", "type": "Token", "desc": ""}"#;
        let raw: RawCardRecord = serde_json::from_str(json).unwrap();
        assert!(raw.card_sets.is_none());
        assert!(raw.card_images.is_empty());
    }

    #[test]
    fn legality_tier_from_sheet_text() {
        assert_eq!(
            LegalityTier::from_sheet_text("Forbidden"),
            Some(LegalityTier::Forbidden)
        );
        assert_eq!(
            LegalityTier::from_sheet_text("SEMI-LIMITED"),
            Some(LegalityTier::SemiLimited)
        );
        assert_eq!(
            LegalityTier::from_sheet_text(" limited "),
            Some(LegalityTier::Limited)
        );
        assert_eq!(LegalityTier::from_sheet_text("banned"), None);
        assert_eq!(LegalityTier::from_sheet_text(""), None);
    }

    #[test]
    fn legality_table_serializes_camel_case_buckets() {
        let json = serde_json::to_value(LegalityTable::default()).unwrap();
        assert!(json.get("semiLimited").is_some());
        assert!(json.get("forbidden").is_some());
        assert_eq!(LegalityTable::default().len(), 0);
    }

    #[test]
    fn tier_serializes_as_copy_limit() {
        assert_eq!(serde_json::to_string(&LegalityTier::Forbidden).unwrap(), "0");
        assert_eq!(serde_json::to_string(&LegalityTier::Limited).unwrap(), "1");
        assert_eq!(serde_json::to_string(&LegalityTier::SemiLimited).unwrap(), "2");
        assert_eq!(serde_json::to_string(&LegalityTier::Unlimited).unwrap(), "3");
    }
}
