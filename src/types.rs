/// Opaque record identifier as supplied by the fetch payload.
/// Examples: `65f1c2a9e4b0`, `U1-https://jobs.example.com/123`
pub type RecordId = String;
/// Identifier of the client that owns a record.
/// Examples: `U1`, `client_42`
pub type OwnerId = String;
/// Lowercased status label used for classification and census keys.
/// Examples: `applied`, `interviewing`, `unknown`
pub type StatusLabel = String;
/// Identifier for the source that produced a job collection.
/// Examples: `memory`, `file:/var/data/jobs.json`
pub type SourceId = String;
/// Human-readable display text produced by formatting helpers.
/// Examples: `10/03/2024`, `10/03/2024, 17:00:00`, `Untitled Role`
pub type DisplayText = String;
/// Warning/log message text.
/// Examples: `skipping non-object job entry`, `job source 'memory' refresh failed: ...`
pub type LogMessage = String;
