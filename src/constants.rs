pub const DEFAULT_VOCABULARY_FILE: &str = "Drugs.csv";

pub const DEFAULT_COLUMN: &str = "name";

pub const DEFAULT_LIMIT: usize = 20;

pub const DEFAULT_LOG_FILE: &str = "rxcomplete.log";

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const SAMPLE_VOCABULARY: &[&str] = &[
    "Aspirin",
    "Ibuprofen",
    "Acetaminophen",
    "Amoxicillin",
    "Ciprofloxacin",
];

pub const COMMAND_PREFIX: char = ':';
