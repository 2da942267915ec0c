//! The deed intake pipeline: ordered consistency checks followed by
//! county reference enrichment.

pub mod amount;
pub mod county;
pub mod domain;
pub mod validate;

pub use county::{
    counties_from_path, counties_from_reader, resolve_county, CountyMatch, CountyRecord,
    ReferenceError, MATCH_THRESHOLD,
};
pub use domain::{DeedRejection, EnrichedDeed, ParsedDeed};

use tracing::info;

/// Run a parsed deed through every consistency check and, if all pass,
/// enrich it with its resolved county record.
///
/// The first violated check wins; a deed is either fully accepted or
/// rejected with exactly one [`DeedRejection`].
pub fn accept_deed(
    deed: ParsedDeed,
    reference: &[CountyRecord],
) -> Result<EnrichedDeed, DeedRejection> {
    validate::run_validations(&deed)?;
    let enriched = county::enrich_deed(deed, reference)?;
    info!(
        document_id = %enriched.deed.document_id,
        county = %enriched.county_canonical,
        "deed accepted"
    );
    Ok(enriched)
}
