pub mod m20250901_000001_participant_data;
