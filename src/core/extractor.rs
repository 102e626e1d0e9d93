use crate::domain::model::{LiftStatus, SelectorConfig, UNKNOWN_LIFT, UNKNOWN_STATUS};
use crate::utils::error::Result;
use crate::utils::validation::parse_selector;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::fmt;

/// Why a document produced no rows at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureMismatch {
    EmptyDocument,
    ContainerMissing { selector: String },
    NoRows { selector: String },
}

impl fmt::Display for StructureMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureMismatch::EmptyDocument => write!(f, "No lift rows found: document is empty"),
            StructureMismatch::ContainerMissing { selector } => write!(
                f,
                "No lift rows found: container '{}' is absent. Page may be dynamic or structure may differ",
                selector
            ),
            StructureMismatch::NoRows { selector } => write!(
                f,
                "No lift rows found: no '{}' elements inside the container",
                selector
            ),
        }
    }
}

/// Pulls [`LiftStatus`] records out of a mountain report page.
///
/// Selectors are compiled once; extraction itself never fails; rows with
/// missing fields fall back to [`UNKNOWN_LIFT`] / [`UNKNOWN_STATUS`].
#[derive(Debug, Clone)]
pub struct LiftExtractor {
    container: Selector,
    row: Selector,
    name: Selector,
    status: Selector,
    container_source: String,
    row_source: String,
    status_attribute: String,
    allowed_statuses: Vec<String>,
}

impl LiftExtractor {
    pub fn new(selectors: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            container: parse_selector(&selectors.container)?,
            row: parse_selector(&selectors.row)?,
            name: parse_selector(&selectors.name)?,
            status: parse_selector(&selectors.status)?,
            container_source: selectors.container.clone(),
            row_source: selectors.row.clone(),
            status_attribute: selectors.status_attribute.clone(),
            allowed_statuses: selectors.allowed_statuses.clone(),
        })
    }

    /// Extract every lift, logging a diagnostic and returning an empty list
    /// when the page structure does not match.
    pub fn extract(&self, html: &str) -> Vec<LiftStatus> {
        match self.try_extract(html) {
            Ok(lifts) => {
                tracing::debug!("Extracted {} lift rows", lifts.len());
                lifts
            }
            Err(mismatch) => {
                tracing::warn!("{}", mismatch);
                Vec::new()
            }
        }
    }

    pub fn try_extract(&self, html: &str) -> std::result::Result<Vec<LiftStatus>, StructureMismatch> {
        if html.trim().is_empty() {
            return Err(StructureMismatch::EmptyDocument);
        }

        let document = Html::parse_document(html);

        let container = document.select(&self.container).next().ok_or_else(|| {
            StructureMismatch::ContainerMissing {
                selector: self.container_source.clone(),
            }
        })?;

        let rows: Vec<ElementRef<'_>> = container.select(&self.row).collect();
        let row_ids: HashSet<_> = rows.iter().map(|row| row.id()).collect();

        // a row nested inside another matched row belongs to that row
        let lifts: Vec<LiftStatus> = rows
            .into_iter()
            .filter(|row| {
                !row.ancestors()
                    .take_while(|node| node.id() != container.id())
                    .any(|node| row_ids.contains(&node.id()))
            })
            .map(|row| self.extract_row(row))
            .collect();

        if lifts.is_empty() {
            return Err(StructureMismatch::NoRows {
                selector: self.row_source.clone(),
            });
        }

        Ok(lifts)
    }

    fn extract_row(&self, row: ElementRef<'_>) -> LiftStatus {
        LiftStatus {
            name: self.row_name(row),
            status: self.row_status(row),
        }
    }

    fn row_name(&self, row: ElementRef<'_>) -> String {
        row.select(&self.name)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_LIFT.to_string())
    }

    fn row_status(&self, row: ElementRef<'_>) -> String {
        row.select(&self.status)
            .filter_map(|el| el.value().attr(&self.status_attribute))
            .map(str::trim)
            .find(|value| !value.is_empty() && self.is_allowed(value))
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string())
    }

    fn is_allowed(&self, value: &str) -> bool {
        self.allowed_statuses.is_empty() || self.allowed_statuses.iter().any(|s| s == value)
    }
}
