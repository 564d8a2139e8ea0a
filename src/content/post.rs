//! Post model

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Authorship tag of a post
///
/// The spreadsheet partitions posts into exactly two listing views. Any wire
/// value other than `principal` is treated as `participante`, matching the
/// two-way branch the site has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Authorship {
    Principal,
    Participante,
}

impl From<String> for Authorship {
    fn from(value: String) -> Self {
        if value == "principal" {
            Authorship::Principal
        } else {
            Authorship::Participante
        }
    }
}

impl Default for Authorship {
    fn default() -> Self {
        Authorship::Participante
    }
}

impl Authorship {
    /// The wire value used by the data source
    pub fn tag(&self) -> &'static str {
        match self {
            Authorship::Principal => "principal",
            Authorship::Participante => "participante",
        }
    }

    /// Human-readable badge label
    pub fn label(&self) -> &'static str {
        match self {
            Authorship::Principal => "Coordenação",
            Authorship::Participante => "Participante",
        }
    }

    /// Which authorship a listing page shows, decided by its file name
    ///
    /// `participantes.html` shows participant posts; every other listing
    /// page shows the coordination posts.
    pub fn for_page(file_name: &str) -> Authorship {
        if file_name == "participantes.html" {
            Authorship::Participante
        } else {
            Authorship::Principal
        }
    }
}

/// A review post, one spreadsheet row from the data source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier, used as the detail-page query key
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,

    /// Display title
    pub titulo: String,

    /// Cover image URL
    #[serde(default)]
    pub imagem: String,

    /// Free-text category label
    #[serde(default)]
    pub categoria: String,

    /// Authorship tag, decides listing page and badge
    #[serde(default)]
    pub autoria: Authorship,

    /// Long-form plain text body, present only once the review is published
    #[serde(default)]
    pub conteudo_completo: Option<String>,

    /// Any additional spreadsheet columns
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Post {
    /// Whether the post has publishable detail content
    pub fn has_full_content(&self) -> bool {
        self.conteudo_completo
            .as_deref()
            .map_or(false, |c| !c.is_empty())
    }
}

/// The spreadsheet backend serializes ids inconsistently: numeric columns
/// arrive as JSON numbers, everything else as strings. Accept both.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
