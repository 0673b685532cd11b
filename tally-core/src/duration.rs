use crate::{MediaDurationEntry, MediaKey, PublisherRecord};

/// Combine newly observed watch time with the stored total for the same media key.
///
/// Additive and total: a missing total counts as zero and the sum saturates.
#[must_use]
pub const fn merge_duration(existing: Option<u64>, observed: u64) -> u64 {
    match existing {
        Some(d) => d.saturating_add(observed),
        None => observed,
    }
}

/// Fold `observed` seconds into the record's entry for `media_key`, creating it if needed.
///
/// Returns the new accumulated total.
pub fn accrue(record: &mut PublisherRecord, media_key: &MediaKey, observed: u64) -> u64 {
    let publisher_key = &record.key;
    let entry = record
        .media
        .entry(media_key.clone())
        .or_insert_with(|| MediaDurationEntry::new(media_key.clone(), publisher_key.clone()));
    entry.merge(observed)
}
