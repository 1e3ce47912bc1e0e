//! Legal pool classification
//!
//! A card enters the pool when any one of its printings satisfies the first
//! matching rule below. It is seeded at [`LegalityTier::Unlimited`]; the banlist
//! sheet may downgrade it afterwards.
//!
//! 1. The set code prefix is on the legal product list.
//! 2. The card name is on the exception sheet.
//! 3. The printing is a Shonen Jump promo numbered below the magazine cutoff.
//! 4. The printing is a YCS prize card numbered below the event cutoff.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{Card, CardIndex, LegalityTier, RawCardRecord, SetPrinting};

/// Shonen Jump magazine promo prefix
pub const JUMP_PREFIX: &str = "JUMP";
pub const DEFAULT_JUMP_CUTOFF: u32 = 69;
/// Yu-Gi-Oh! Championship Series prize card prefix
pub const YCSW_PREFIX: &str = "YCSW";
pub const DEFAULT_YCSW_CUTOFF: u32 = 7;

lazy_static! {
    /// Products released within the format
    static ref LEGAL_SETS: HashSet<&'static str> = [
        // Standard sets
        "LOB", "MRD", "SRL", "PSV", "LON", "LOD", "PGD", "MFC",
        "DCR", "IOC", "AST", "SOD", "RDS", "DB1", "FET", "DR1",
        "TLM", "DB2", "CRV", "EEN", "DR2", "SOI", "EOJ", "POTD",
        "CDIP", "DR3", "STON", "FOTB", "TAEV", "GLAS", "PP01", "PTDN",
        "DR04", "LODT", "TDGS", "CSOC", "PP02", "CRMS", "RGBT", "ANPR",
        "SOVR", "HA01", "ABPF", "TSHD", "DREV", "STBL", "HA02", "HA03",
        "STOR", "EXVC", "GENF", "PHSW", "HA04", "HA05", "YMP1", "ORCS",
        "GAOV", "REDU", "ABYR", "HA06", "BP01", "CBLZ", "HA07", "LTGY",
        "NUMH", "BP02", "JOTL", "SHSP", "LVAL", "DRLG", "PRIO", "BP03",
        "DUEA",
        // Duelist Packs
        "DP1", "DP2", "DP03", "DP04", "DP05", "DP06", "DP07", "DP08",
        "DP09", "DP10", "DPKB", "DP11", "DPYG",
        // Starter Decks
        "SDJ", "SDK", "SKE", "SDP", "SDY", "SYE", "YSD", "YSDJ",
        "YSDS", "5DS1", "5DS2", "5DS3", "YS11", "YS12", "YS13", "YSYR",
        "YSKR", "YS14",
        // Structure decks
        "SD1", "SD2", "SD3", "SD4", "SD5", "SD6", "SD7", "SD8",
        "SD09", "SD10", "SDRL", "SDDE", "SDZW", "SDSC", "SDWS", "SDMM",
        "SDMA", "SDDL", "SDLS", "SDGU", "SDDC", "SDWA", "SDRE", "SDOK",
        "SDBE", "SDCR", "SDLI",
        // Legendary collections
        "LC01", "LC02", "LCGX", "LC03", "LCYW", "LC04", "LCJW",
        // Gold series
        "GLD1", "GLD2", "GLD3", "GLD4", "GLD5", "PGLD",
        // Shonen Jump promos
        "JMP", "SJC", "SJCS",
        // Manga promos
        "YR01", "YR02", "YR03", "YR04", "YR05", "YG01", "YG02", "YG03",
        "YG04", "YG05", "YG06", "YG07", "YG08", "YG09", "YF01", "YF02",
        "YF03", "YF04", "YF05", "YF06", "YZ01", "YZ02", "YZ03", "YZ04",
        "YZ05",
        // Game promos
        "PCY", "PCK", "PCJ", "TSC", "GX1", "GX02", "GX03", "GX04",
        "GX05", "NTR", "DOR", "DDS", "SDD", "DBT", "CMC", "FMR",
        "EDS", "DOD", "ROD", "TFK", "WC4", "WC5", "WC6", "WC07",
        "WC08", "WC09", "WB01",
        // Other promos
        "ZTIN", "PRC1", "EM1", "PT1", "PT02", "PT03", "FL1", "DMG",
        "YMA", "MP1", "MDP2", "MOV", "DPK", "GSE", "UE02", "TKN1",
        "TKN2", "TKN3", "YCB", "UBP1", "MF01", "MF02", "MF03", "TYL",
        "SAAS", "SP1", "SP2", "SP02",
    ]
    .into_iter()
    .collect();
}

/// Numeric cutoffs for the promo rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalityRules {
    pub jump_cutoff: u32,
    pub ycsw_cutoff: u32,
}

impl Default for LegalityRules {
    fn default() -> Self {
        Self {
            jump_cutoff: DEFAULT_JUMP_CUTOFF,
            ycsw_cutoff: DEFAULT_YCSW_CUTOFF,
        }
    }
}

/// Split `PREFIX-NNN` into the product prefix and the sequence number.
///
/// The number keeps only the ASCII digits after the dash, so `JUMP-EN069`
/// yields `69`. Codes without digits have no number.
pub fn split_set_code(set_code: &str) -> (&str, Option<u32>) {
    let (prefix, rest) = set_code.split_once('-').unwrap_or((set_code, ""));
    let digits: String = rest.chars().filter(|c| c.is_ascii_digit()).collect();
    (prefix, digits.parse().ok())
}

pub fn is_legal_product(prefix: &str) -> bool {
    LEGAL_SETS.contains(prefix)
}

impl LegalityRules {
    /// Whether a single printing grants legality
    pub fn printing_is_legal(
        &self,
        name: &str,
        printing: &SetPrinting,
        always_legal: &HashSet<String>,
    ) -> bool {
        let (prefix, number) = split_set_code(&printing.set_code);

        if is_legal_product(prefix) {
            return true;
        }
        if always_legal.contains(name) {
            return true;
        }
        match (prefix, number) {
            (JUMP_PREFIX, Some(n)) => n < self.jump_cutoff,
            (YCSW_PREFIX, Some(n)) => n < self.ycsw_cutoff,
            _ => false,
        }
    }

    /// Classify one feed record; `None` means the card is outside the pool
    pub fn classify(&self, raw: RawCardRecord, always_legal: &HashSet<String>) -> Option<Card> {
        let printings = raw.card_sets.as_deref()?;
        let legal = printings
            .iter()
            .any(|p| self.printing_is_legal(&raw.name, p, always_legal));

        if legal {
            Some(Card::from_raw(raw, LegalityTier::Unlimited))
        } else {
            None
        }
    }

    /// Build the name-keyed index of every legal card in the feed
    pub fn build_card_index(
        &self,
        raws: Vec<RawCardRecord>,
        always_legal: &HashSet<String>,
    ) -> CardIndex {
        let total = raws.len();
        let mut index = CardIndex::with_capacity(total / 2);

        for raw in raws {
            if index.contains_key(&raw.name) {
                log::debug!("Duplicate card name in feed, keeping first: {}", raw.name);
                continue;
            }
            if let Some(card) = self.classify(raw, always_legal) {
                index.insert(card.name.clone(), Arc::new(card));
            }
        }

        log::info!(
            "Classified {} of {} feed cards as legal ({} always-legal exceptions)",
            index.len(),
            total,
            always_legal.len()
        );
        index
    }
}

#[cfg(test)]
#[path = "legality_tests.rs"]
mod tests;
