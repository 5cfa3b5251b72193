//! Header normalization onto the canonical field names of each dataset kind.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::filename::canonical;
use crate::table::Table;

pub const TIME: &str = "time";
pub const TEMPERATURE: &str = "temperature";
pub const HUMIDITY: &str = "humidity";
pub const PH: &str = "ph";
pub const EC: &str = "ec";

/// Columns an environment source must carry after normalization.
pub const ENVIRONMENT_REQUIRED: [&str; 5] = [TIME, TEMPERATURE, HUMIDITY, PH, EC];

pub const SPECIMEN_ID: &str = "specimen_id";
pub const LEAF_COUNT: &str = "leaf_count";
pub const SHOOT_LENGTH: &str = "shoot_length";
pub const ROOT_LENGTH: &str = "root_length";
pub const FRESH_WEIGHT: &str = "fresh_weight";

/// Recognized (all optional) growth fields.
pub const GROWTH_FIELDS: [&str; 5] = [SPECIMEN_ID, LEAF_COUNT, SHOOT_LENGTH, ROOT_LENGTH, FRESH_WEIGHT];

// Keys are whitespace-free and lowercase. Canonical names map to themselves.
static GROWTH_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let table: [(&str, &[&str]); 5] = [
        (
            SPECIMEN_ID,
            &["개체번호", "개체번호(번)", "개체", "번호", "specimen_id", "specimenid", "specimen", "id", "no", "no."],
        ),
        (
            LEAF_COUNT,
            &["잎수", "잎수(장)", "잎개수", "잎의수", "leaf_count", "leafcount", "leaves", "leafcount(ea)"],
        ),
        (
            SHOOT_LENGTH,
            &[
                "지상부길이",
                "지상부길이(mm)",
                "지상부길이(cm)",
                "지상부",
                "shoot_length",
                "shootlength",
                "shootlength(mm)",
                "shootlength(cm)",
            ],
        ),
        (
            ROOT_LENGTH,
            &[
                "지하부길이",
                "지하부길이(mm)",
                "지하부길이(cm)",
                "지하부",
                "root_length",
                "rootlength",
                "rootlength(mm)",
                "rootlength(cm)",
            ],
        ),
        (
            FRESH_WEIGHT,
            &[
                "생중량",
                "생중량(g)",
                "생체중",
                "생체중(g)",
                "무게",
                "무게(g)",
                "fresh_weight",
                "freshweight",
                "freshweight(g)",
                "biomass",
                "biomass(g)",
                "weight",
                "weight(g)",
            ],
        ),
    ];

    let mut aliases = HashMap::new();
    for (canonical_name, variants) in table {
        for variant in variants {
            aliases.insert(*variant, canonical_name);
        }
    }
    aliases
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Environment,
    Growth,
}

/// Environment headers: trimmed and lowercased.
pub fn environment_header(raw: &str) -> String {
    canonical(raw).trim().to_lowercase()
}

/// Growth headers: all whitespace removed, then mapped through the alias table.
/// Unknown headers keep their whitespace-free spelling.
pub fn growth_header(raw: &str) -> String {
    let compact: String = canonical(raw).chars().filter(|c| !c.is_whitespace()).collect();
    match GROWTH_ALIASES.get(compact.to_lowercase().as_str()) {
        Some(name) => name.to_string(),
        None => compact,
    }
}

/// Relabels the columns of `table` for the given kind. Rows pass through untouched.
pub fn normalize(table: Table, kind: TableKind) -> Table {
    match kind {
        TableKind::Environment => table.rename_columns(environment_header),
        TableKind::Growth => table.rename_columns(growth_header),
    }
}
