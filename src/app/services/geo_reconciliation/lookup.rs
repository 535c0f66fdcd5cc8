//! Static state / ZIP / area-code lookup tables
//!
//! Built once on first use and shared read-only for the life of the process.
//! Territories (PR, VI) carry ranges and representative ZIPs so that their ZIPs
//! are recognised, even though the state validator later rejects them.

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Raw Tables
// =============================================================================

const REPRESENTATIVE_ZIPS: &[(&str, &str)] = &[
    ("AL", "35007"), ("AK", "99501"), ("AZ", "85304"), ("AR", "71602"), ("CA", "90005"),
    ("CO", "80001"), ("CT", "06001"), ("DE", "19701"), ("DC", "20012"), ("FL", "32003"),
    ("GA", "30002"), ("HI", "96701"), ("ID", "83203"), ("IL", "61081"), ("IN", "46011"),
    ("IA", "50005"), ("KS", "66008"), ("KY", "40007"), ("LA", "70001"), ("ME", "04750"),
    ("MD", "20601"), ("MA", "05544"), ("MI", "48706"), ("MN", "54403"), ("MS", "38601"),
    ("MO", "64722"), ("MT", "59001"), ("NE", "68001"), ("NV", "88905"), ("NH", "03031"),
    ("NJ", "07753"), ("NC", "28376"), ("NM", "87001"), ("NY", "10028"), ("ND", "58001"),
    ("OH", "45434"), ("OK", "73002"), ("OR", "97009"), ("PA", "15001"), ("RI", "02823"),
    ("SC", "29001"), ("SD", "57002"), ("TN", "37011"), ("TX", "73344"), ("UT", "84002"),
    ("VT", "05009"), ("VA", "20101"), ("WA", "98001"), ("WV", "24712"), ("WI", "54990"),
    ("WY", "82002"), ("PR", "00999"), ("VI", "00851"),
];

const ZIP_RANGES: &[(&str, &[(u32, u32)])] = &[
    ("AL", &[(35000, 36999)]),
    ("AK", &[(99500, 99999)]),
    ("AZ", &[(85000, 86999)]),
    ("AR", &[(71600, 72999)]),
    ("CA", &[(90000, 96699)]),
    ("CO", &[(80000, 81999)]),
    ("CT", &[(6000, 6999)]),
    ("DE", &[(19700, 19999)]),
    ("DC", &[(20000, 20099), (20200, 20599), (56900, 56999)]),
    ("FL", &[(32000, 34999)]),
    ("GA", &[(30000, 31999), (39800, 39999)]),
    ("HI", &[(96700, 96999)]),
    ("ID", &[(83200, 83999)]),
    ("IL", &[(60000, 62999)]),
    ("IN", &[(46000, 47999)]),
    ("IA", &[(50000, 52999)]),
    ("KS", &[(66000, 67999)]),
    ("KY", &[(40000, 42999)]),
    ("LA", &[(70000, 71599)]),
    ("ME", &[(3900, 4999)]),
    ("MD", &[(20600, 21999)]),
    ("MA", &[(1000, 2799), (5501, 5544)]),
    ("MI", &[(48000, 49999)]),
    ("MN", &[(55000, 56899)]),
    ("MS", &[(38600, 39999)]),
    ("MO", &[(63000, 65999)]),
    ("MT", &[(59000, 59999)]),
    ("NC", &[(27000, 28999)]),
    ("ND", &[(58000, 58999)]),
    ("NE", &[(68000, 69999)]),
    ("NV", &[(88900, 89999)]),
    ("NH", &[(3000, 3899)]),
    ("NJ", &[(7000, 8999)]),
    ("NM", &[(87000, 88499)]),
    ("NY", &[(10000, 14999), (6390, 6390), (501, 501), (544, 544)]),
    ("OH", &[(43000, 45999)]),
    ("OK", &[(73000, 74999)]),
    ("OR", &[(97000, 97999)]),
    ("PA", &[(15000, 19699)]),
    ("RI", &[(2800, 2999)]),
    ("SC", &[(29000, 29999)]),
    ("SD", &[(57000, 57999)]),
    ("TN", &[(37000, 38599)]),
    ("TX", &[(75000, 79999), (73301, 73399), (88500, 88599)]),
    ("UT", &[(84000, 84999)]),
    ("VT", &[(5000, 5999)]),
    ("VA", &[(20100, 24699)]),
    ("WA", &[(98000, 99499)]),
    ("WV", &[(24700, 26999)]),
    ("WI", &[(53000, 54999)]),
    ("WY", &[(82000, 83199), (83414, 83414)]),
    ("PR", &[(600, 999)]),
    ("VI", &[(801, 851)]),
];

const AREA_CODES: &[(&str, &[&str])] = &[
    ("AL", &["205", "251", "256", "334"]),
    ("AK", &["907"]),
    ("AZ", &["480", "520", "602", "623", "928"]),
    ("AR", &["479", "501", "870"]),
    (
        "CA",
        &[
            "209", "213", "310", "323", "408", "415", "424", "442", "510", "559", "562", "619",
            "626", "650", "657", "661", "707", "714", "760", "805", "818", "831", "858", "909",
            "916", "925", "949", "951",
        ],
    ),
    ("CO", &["303", "719", "720", "970"]),
    ("CT", &["203", "475", "860", "959"]),
    ("DC", &["202"]),
    ("DE", &["302"]),
    (
        "FL",
        &[
            "305", "321", "352", "386", "407", "561", "727", "754", "772", "786", "813", "850",
            "863", "904", "941", "954",
        ],
    ),
    ("GA", &["229", "404", "470", "478", "678", "706", "770", "912"]),
    ("HI", &["808"]),
    (
        "IL",
        &[
            "217", "224", "309", "312", "331", "618", "630", "708", "773", "779", "815", "847",
        ],
    ),
    (
        "NY",
        &[
            "315", "332", "347", "516", "518", "585", "607", "631", "646", "716", "718", "845",
            "914", "917", "929",
        ],
    ),
    (
        "TX",
        &[
            "210", "214", "254", "281", "325", "346", "361", "409", "430", "432", "469", "512",
            "682", "713", "726", "737", "806", "817", "830", "832", "903", "936", "940", "956",
            "972", "979",
        ],
    ),
];

// =============================================================================
// Lookup Types
// =============================================================================

/// Closed range of five-digit ZIP codes, held as integers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZipRange {
    pub start: u32,
    pub end: u32,
}

impl ZipRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, zip: u32) -> bool {
        zip >= self.start && zip <= self.end
    }

    /// Number of ZIPs in the range minus one; used to prefer specific ranges
    pub fn width(&self) -> u32 {
        self.end - self.start
    }
}

/// Process-wide geographic lookup tables
#[derive(Debug)]
pub struct GeoTables {
    representative_zips: BTreeMap<&'static str, &'static str>,
    zip_ranges: BTreeMap<&'static str, Vec<ZipRange>>,
    area_codes: BTreeMap<&'static str, &'static [&'static str]>,
    area_code_index: HashMap<&'static str, &'static str>,
}

static GEO_TABLES: Lazy<GeoTables> = Lazy::new(GeoTables::build);

/// Shared lookup tables, built on first call
pub fn geo_tables() -> &'static GeoTables {
    &GEO_TABLES
}

impl GeoTables {
    fn build() -> Self {
        let representative_zips = REPRESENTATIVE_ZIPS.iter().copied().collect();

        let zip_ranges = ZIP_RANGES
            .iter()
            .map(|(state, ranges)| {
                let ranges = ranges
                    .iter()
                    .map(|&(start, end)| ZipRange::new(start, end))
                    .collect();
                (*state, ranges)
            })
            .collect();

        let area_codes: BTreeMap<&'static str, &'static [&'static str]> =
            AREA_CODES.iter().copied().collect();

        // BTreeMap iteration is alphabetical, so the first claimant of a code wins
        let mut area_code_index = HashMap::new();
        for (state, codes) in &area_codes {
            for code in codes.iter() {
                area_code_index.entry(*code).or_insert(*state);
            }
        }

        Self {
            representative_zips,
            zip_ranges,
            area_codes,
            area_code_index,
        }
    }

    /// ZIP used to fill in a missing postal code for `state`
    pub fn representative_zip(&self, state: &str) -> Option<&'static str> {
        self.representative_zips.get(state).copied()
    }

    /// ZIP ranges registered for `state` (empty when the state is unknown)
    pub fn ranges_for(&self, state: &str) -> &[ZipRange] {
        self.zip_ranges.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when `zip` falls inside one of `state`'s ranges
    pub fn zip_in_state(&self, zip: u32, state: &str) -> bool {
        self.ranges_for(state).iter().any(|range| range.contains(zip))
    }

    /// State owning `zip`
    ///
    /// Scans every state's ranges. Where ranges overlap, the narrowest
    /// containing range wins and equal widths go to the alphabetically first
    /// state code.
    pub fn state_for_zip(&self, zip: u32) -> Option<&'static str> {
        let mut best: Option<(&'static str, u32)> = None;

        for (state, ranges) in &self.zip_ranges {
            for range in ranges.iter().filter(|range| range.contains(zip)) {
                let narrower = best.is_none_or(|(_, width)| range.width() < width);
                if narrower {
                    best = Some((*state, range.width()));
                }
            }
        }

        best.map(|(state, _)| state)
    }

    /// State that owns a telephone area code
    pub fn state_for_area_code(&self, area_code: &str) -> Option<&'static str> {
        self.area_code_index.get(area_code).copied()
    }

    /// Area codes registered for `state`
    pub fn area_codes_for(&self, state: &str) -> &'static [&'static str] {
        self.area_codes.get(state).copied().unwrap_or(&[])
    }
}
