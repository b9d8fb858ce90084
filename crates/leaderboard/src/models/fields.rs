/// Ordered candidate locations for one canonical field.
///
/// The same value can arrive as `LapTime`, `lap_time` or `Time`, or nested
/// as `driver.Name` or `car_class.class.Name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAlias {
    /// Canonical field id.
    pub field: &'static str,
    /// Nested paths, tried before the flat keys.
    pub nested: &'static [&'static [&'static str]],
    /// Flat top-level keys.
    pub keys: &'static [&'static str],
}

impl FieldAlias {
    pub const fn flat(field: &'static str, keys: &'static [&'static str]) -> Self {
        Self {
            field,
            nested: &[],
            keys,
        }
    }

    /// True when `key` is the canonical id or one of the flat aliases.
    pub fn matches(&self, key: &str) -> bool {
        self.field == key || self.keys.contains(&key)
    }
}

pub const POSITION: FieldAlias = FieldAlias::flat("position", &["Position", "position", "Pos"]);

pub const NAME: FieldAlias = FieldAlias {
    field: "name",
    nested: &[&["driver", "Name"], &["driver", "name"]],
    keys: &["Name", "name", "DriverName", "driver_name"],
};

pub const COUNTRY: FieldAlias = FieldAlias {
    field: "country",
    nested: &[&["country", "Name"], &["country", "name"]],
    keys: &["Country", "country"],
};

pub const CAR_CLASS: FieldAlias = FieldAlias {
    field: "car_class",
    nested: &[
        &["car_class", "class", "Name"],
        &["car_class", "class", "name"],
        &["car_class", "Name"],
        &["car_class", "name"],
    ],
    keys: &[
        "CarClass",
        "Car Class",
        "car_class",
        "Class",
        "class",
        "ClassName",
        "className",
        "class_name",
    ],
};

pub const CAR: FieldAlias = FieldAlias {
    field: "car",
    nested: &[
        &["car_class", "car", "Name"],
        &["car_class", "car", "name"],
        &["vehicle", "Name"],
        &["vehicle", "name"],
        &["car", "Name"],
        &["car", "name"],
    ],
    keys: &["Car", "car", "CarName", "car_name"],
};

pub const LAP_TIME: FieldAlias = FieldAlias::flat(
    "lap_time",
    &["LapTime", "Lap Time", "lap_time", "laptime", "Time", "time"],
);

pub const TRACK: FieldAlias =
    FieldAlias::flat("track", &["Track", "track", "TrackName", "track_name"]);

pub const DIFFICULTY: FieldAlias = FieldAlias::flat(
    "difficulty",
    &["Difficulty", "difficulty", "driving_model", "DrivingModel"],
);

pub const RANK: FieldAlias = FieldAlias {
    field: "rank",
    nested: &[&["rank", "Name"], &["rank", "name"]],
    keys: &["Rank", "rank"],
};

pub const TEAM: FieldAlias = FieldAlias {
    field: "team",
    nested: &[&["team", "Name"], &["team", "name"]],
    keys: &["Team", "team"],
};

pub const TRACK_ID: FieldAlias =
    FieldAlias::flat("track_id", &["track_id", "TrackID", "trackId", "Track ID"]);

pub const CLASS_ID: FieldAlias = FieldAlias {
    field: "class_id",
    nested: &[&["car_class", "class", "Id"], &["car_class", "class", "ID"]],
    keys: &["class_id", "ClassID", "classId", "Class ID"],
};

pub const TOTAL_ENTRIES: FieldAlias = FieldAlias::flat(
    "total_entries",
    &[
        "TotalEntries",
        "total_entries",
        "Total Entries",
        "entry_count",
        "EntryCount",
        "TotalRacers",
        "total_racers",
    ],
);

pub const DATE_TIME: FieldAlias =
    FieldAlias::flat("date_time", &["date_time", "dateTime", "Date", "DateTime"]);

pub const GAP_PERCENT: FieldAlias =
    FieldAlias::flat("gap_percent", &["GapPercent", "gap_percent", "gapPercent"]);

pub const TIME_DIFF: FieldAlias = FieldAlias::flat(
    "time_diff",
    &[
        "time_diff",
        "timeDiff",
        "timeDifference",
        "time_diff_s",
        "time_diff_seconds",
    ],
);

pub const FOUND: FieldAlias = FieldAlias::flat("found", &["found", "Found"]);
