pub mod record_store;
pub mod response;

pub use record_store::{
    create_shared_record_store, CollectionKeys, RecordStore, SharedRecordStore, Snapshot,
};
pub use response::QueryResult;
