pub mod mint;
pub mod types;
pub mod vault;

pub use mint::{MintContext, content_hash, generate_record_id, is_record_id, mint_from_attestation};
pub use types::{Draft, LogbookEntry, Record, RecordId, RecordKind, UploadedFile};
pub use vault::{logbook_rows, vault_rows};
