//! Application constants for the eBird parser
//!
//! Column positions of the eBird "My Data" export and the date/time formats
//! used to read them.

// =============================================================================
// Column Layout
// =============================================================================

/// Zero-based column positions in the export
pub mod columns {
    pub const SUBMISSION_ID: usize = 0;
    pub const COMMON_NAME: usize = 1;
    pub const SCIENTIFIC_NAME: usize = 2;
    pub const TAXON_ORDER: usize = 3;
    pub const COUNT: usize = 4;
    pub const SUBNATIONAL1_CODE: usize = 5;
    pub const SUBNATIONAL2_NAME: usize = 6;
    pub const LOCATION_ID: usize = 7;
    pub const LOCATION_NAME: usize = 8;
    pub const LATITUDE: usize = 9;
    pub const LONGITUDE: usize = 10;
    pub const DATE: usize = 11;
    pub const TIME: usize = 12;
    pub const PROTOCOL: usize = 13;
    pub const DURATION_MINUTES: usize = 14;
    pub const COMPLETE_CHECKLIST: usize = 15;

    // Optional trailing columns, only read when the record is wide enough
    pub const DISTANCE_KM: usize = 16;
    pub const AREA_HECTARES: usize = 17;
    pub const PARTY_SIZE: usize = 18;
    pub const BREEDING_CODE: usize = 19;
    // 20 and 21 (observation details, checklist comments) are ignored
    pub const ASSET_IDS: usize = 22;
}

// =============================================================================
// Value Formats
// =============================================================================

/// Observation date format (yyyy-MM-dd)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Observation time format, 12-hour clock (hh:mm AM/PM)
pub const TIME_FORMAT: &str = "%I:%M %p";

/// Exact layout of a date value (`9` = digit)
pub const DATE_SHAPE: &str = "9999-99-99";

/// Exact layout of a time value (`9` = digit, `A` = letter)
pub const TIME_SHAPE: &str = "99:99 AA";

/// Raw value marking a complete checklist
pub const COMPLETE_CHECKLIST_FLAG: &str = "1";

/// Separator between media asset ids
pub const ASSET_ID_SEPARATOR: char = ' ';

/// Record number of the header line
pub const HEADER_RECORD_NUMBER: u64 = 1;
