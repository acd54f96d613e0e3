//! Catalog record model, matching the keys of the champion JSON document

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// One catalog entry.
///
/// Every field except `id` and `name` is optional in the source data and
/// falls back to an empty value, so a sparse hand-written entry still loads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Record {
    /// Stable identifier. Empty in the source means "synthesize one at load".
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(rename = "nome", alias = "name", deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(rename = "titulo", alias = "title", deserialize_with = "null_as_default")]
    pub title: String,

    /// Short blurb shown on the back of a card.
    #[serde(rename = "descricao", alias = "summary", deserialize_with = "null_as_default")]
    pub summary: String,

    #[serde(rename = "historia", alias = "story", skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,

    #[serde(
        rename = "historia_completa",
        alias = "full_story",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_story: Option<String>,

    #[serde(rename = "funcao", alias = "role", skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleField>,

    #[serde(rename = "funcoes", alias = "roles", skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,

    #[serde(rename = "ano", alias = "year", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(rename = "frase", alias = "quote", skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,

    #[serde(rename = "imagem", alias = "image", deserialize_with = "null_as_default")]
    pub image: String,

    /// Viability breakdown on a 0-10 scale, kept in document order.
    #[serde(rename = "viabilidade", alias = "stats", deserialize_with = "null_as_default")]
    pub stats: IndexMap<String, f64>,

    /// Names or identifiers of other records.
    #[serde(rename = "relacionamentos", alias = "related", deserialize_with = "null_as_default")]
    pub related: Vec<String>,

    #[serde(rename = "habilidades", alias = "abilities", deserialize_with = "null_as_default")]
    pub abilities: Vec<Ability>,

    #[serde(deserialize_with = "null_as_default")]
    pub skins: Vec<Skin>,
}

/// The `funcao` key holds either one role or a list of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RoleField {
    One(String),
    Many(Vec<String>),
}

impl RoleField {
    pub fn contains(&self, role: &str) -> bool {
        match self {
            RoleField::One(value) => value == role,
            RoleField::Many(values) => values.iter().any(|value| value == role),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            RoleField::One(value) => std::slice::from_ref(value),
            RoleField::Many(values) => values,
        };
        values.iter().map(String::as_str)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Ability {
    #[serde(rename = "nome", alias = "name", deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(rename = "icone", alias = "icon", deserialize_with = "null_as_default")]
    pub icon: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,

    #[serde(rename = "descricao", alias = "description", deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Skin {
    #[serde(rename = "nome", alias = "name", deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(rename = "imagem", alias = "image", deserialize_with = "null_as_default")]
    pub image: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Record {
    /// Category membership. A `funcoes` list wins over `funcao` when both exist.
    pub fn has_role(&self, role: &str) -> bool {
        match (&self.roles, &self.role) {
            (Some(roles), _) => roles.iter().any(|value| value == role),
            (None, Some(field)) => field.contains(role),
            (None, None) => false,
        }
    }

    /// All roles of the record, in document order.
    pub fn role_names(&self) -> Vec<&str> {
        match (&self.roles, &self.role) {
            (Some(roles), _) => roles.iter().map(String::as_str).collect(),
            (None, Some(field)) => field.iter().collect(),
            (None, None) => Vec::new(),
        }
    }

    /// Year used for ordering; records without one sort as year 0.
    pub fn sort_year(&self) -> i32 {
        self.year.unwrap_or(0)
    }

    /// Long-form narrative, falling back to the shorter texts.
    pub fn narrative(&self) -> &str {
        [self.full_story.as_deref(), self.story.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
            .unwrap_or(&self.summary)
    }
}
