use shared_types::ObjectId;
use time::OffsetDateTime;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoredObject {
    pub id: ObjectId,
    pub created_date: OffsetDateTime,
    pub bucket: String,
    pub path: String,
    pub content_type: String,
    pub content: Vec<u8>,
}
