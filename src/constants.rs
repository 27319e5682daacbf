/// Constants used by status classification and census ordering.
pub mod status {
    /// Reference label identifying an active ("applied") application.
    pub const STATUS_APPLIED: &str = "applied";
    /// Label used when a record carries no usable top-level status.
    pub const STATUS_UNKNOWN: &str = "unknown";
    /// Well-known labels listed first, in this order, when rendering a census.
    pub const COMMON_STATUS_ORDER: [&str; 6] = [
        "applied",
        "interviewing",
        "rejected",
        "offer",
        "hired",
        "on-hold",
    ];
}

/// Constants used by display formatting.
pub mod display {
    /// Placeholder rendered for an absent canonical instant.
    pub const ABSENT_DATE_PLACEHOLDER: &str = "—";
    /// Placeholder rendered for a record without a title.
    pub const UNTITLED_ROLE_PLACEHOLDER: &str = "Untitled Role";
    /// Placeholder rendered for a record without a company name.
    pub const COMPANY_PLACEHOLDER: &str = "Company";
}

/// Constants used by payload decoding and job sources.
pub mod ingestion {
    /// Top-level payload field holding the job array.
    pub const PAYLOAD_JOBS_FIELD: &str = "jobDB";
    /// Source id used by `InMemoryJobSource` when none is given.
    pub const IN_MEMORY_SOURCE_ID: &str = "memory";
    /// Prefix for ids of file-backed sources (followed by the path).
    pub const FILE_SOURCE_ID_PREFIX: &str = "file:";
    /// Log message used when a payload entry is not a JSON object.
    pub const SKIP_NON_OBJECT_MSG: &str = "skipping non-object job entry";
    /// Log message used when a payload entry fails to decode.
    pub const SKIP_UNDECODABLE_MSG: &str = "skipping undecodable job entry";
}
