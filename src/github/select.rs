//! Choosing one asset out of a release

use super::types::Asset;
use crate::core::{RelfetchError, RelfetchResult};

/// Assets whose names contain every filter, in release order
pub fn filter_assets<'a, S: AsRef<str>>(assets: &'a [Asset], filters: &[S]) -> Vec<&'a Asset> {
    assets
        .iter()
        .filter(|asset| filters.iter().all(|f| asset.name.contains(f.as_ref())))
        .collect()
}

/// Pick the single asset matching `filters`
///
/// An asset whose name equals one of the filters wins over partial matches.
///
/// # Errors
///
/// Returns [`RelfetchError::Asset`] when no asset or more than one asset
/// remains after filtering.
pub fn select_asset<S: AsRef<str>>(assets: &[Asset], filters: &[S]) -> RelfetchResult<Asset> {
    let candidates = filter_assets(assets, filters);

    match candidates.as_slice() {
        [] => Err(RelfetchError::Asset(format!(
            "no asset matches {}",
            describe(filters)
        ))),
        [only] => Ok((*only).clone()),
        many => {
            let exact: Vec<_> = many
                .iter()
                .filter(|a| filters.iter().any(|f| a.name == f.as_ref()))
                .collect();
            if let [only] = exact.as_slice() {
                return Ok((**only).clone());
            }

            let names: Vec<&str> = many.iter().map(|a| a.name.as_str()).collect();
            Err(RelfetchError::Asset(format!(
                "{} assets match {}, narrow with --asset: {}",
                many.len(),
                describe(filters),
                names.join(", ")
            )))
        }
    }
}

fn describe<S: AsRef<str>>(filters: &[S]) -> String {
    if filters.is_empty() {
        return "(no filter)".to_string();
    }
    filters
        .iter()
        .map(|f| format!("'{}'", f.as_ref()))
        .collect::<Vec<_>>()
        .join(" and ")
}
