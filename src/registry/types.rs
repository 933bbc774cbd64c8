//! Registry records as returned by the search endpoint

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::format::{capitalize, format_int_fr};
use crate::util::{deserialize_flag, deserialize_opt_text, deserialize_text};

/// One business entity ("unité légale") matching a query.
///
/// Only `siren` and `nom_complet` are used for rendering. Fields without a
/// typed counterpart are kept in `extra` so nothing the registry sends is
/// lost. Typed metadata decodes leniently: a malformed value there reads as
/// absent instead of failing the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(deserialize_with = "deserialize_text")]
    pub siren: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub nom_complet: String,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub siret: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub nom_raison_sociale: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub geo_adresse: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub code_postal: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub libelle_commune: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub activite_principale: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub etat_administratif_unite_legale: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_creation_entreprise: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_siege: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub economie_sociale_solidaire_unite_legale: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchResult {
    /// Name as shown in the dropdown
    pub fn display_name(&self) -> String {
        capitalize(&self.nom_complet)
    }

    /// Identifier grouped by three, e.g. `414 971 929`
    pub fn display_siren(&self) -> String {
        format_int_fr(&self.siren)
    }

    /// Whether the legal unit is explicitly marked active ("A")
    pub fn is_active(&self) -> bool {
        self.etat_administratif_unite_legale.as_deref() == Some("A")
    }

    /// Whether the legal unit is explicitly marked ceased ("C"). A record
    /// without an administrative state is not ceased.
    pub fn is_ceased(&self) -> bool {
        self.etat_administratif_unite_legale.as_deref() == Some("C")
    }

    /// Creation date of the company, if present and well-formed
    pub fn creation_date(&self) -> Option<NaiveDate> {
        let raw = self.date_creation_entreprise.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.date())
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }

    /// Best available one-line address
    pub fn address(&self) -> Option<String> {
        if let Some(addr) = &self.geo_adresse {
            return Some(addr.clone());
        }
        match (&self.code_postal, &self.libelle_commune) {
            (Some(cp), Some(commune)) => Some(format!("{cp} {commune}")),
            (None, Some(commune)) => Some(commune.clone()),
            _ => None,
        }
    }
}

/// A page of search results with pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    #[serde(default)]
    pub unite_legale: Vec<SearchResult>,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub per_page: u64,
    #[serde(default)]
    pub total_pages: u64,
}

impl ResultPage {
    pub fn len(&self) -> usize {
        self.unite_legale.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unite_legale.is_empty()
    }

    /// More results exist beyond this page
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages || (self.unite_legale.len() as u64) < self.total_results
    }
}
