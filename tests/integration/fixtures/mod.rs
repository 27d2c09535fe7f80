// Documents with known abbreviations and their expected rewrites
// WHY: golden-file testing requires deterministic input/output pairs

/// Two abbreviations, one needing the extra-word slot left empty
pub const SAMPLE_TEXT: &str = "This is a test string (TS). I hope it is informative (inf).";

pub const SAMPLE_EXPANDED: &str =
    "This is a test string (test string). I hope it is informative (informative).";

pub const SAMPLE_COMPRESSED: &str = "This is a TS (TS). I hope it is inf (inf).";

/// Four-letter abbreviation reused later in the document
pub const NEURO_TEXT: &str =
    "Neurons in the substantia nigra pars compacta (SNPC) degenerate. Loss of SNPC neurons follows.";

pub const NEURO_EXPANDED: &str = "Neurons in the substantia nigra pars compacta (substantia nigra pars compacta) degenerate. Loss of substantia nigra pars compacta neurons follows.";

/// Stopword inside the term and a plural use afterwards
pub const ROI_TEXT: &str = "A region of interest (ROI) was drawn. Both ROIs were checked.";

/// Same abbreviation defined differently than in SAMPLE_TEXT
pub const TIME_SERIES_TEXT: &str = "Each time series (TS) was smoothed.";

/// Hyphenated line wrap inside the term
pub const WRAPPED_TEXT: &str = "The mag-\nnetic field (MF) was\r\n\tstrong.";

/// Expected corpus table for SAMPLE_TEXT, NEURO_TEXT, a second SAMPLE_TEXT and TIME_SERIES_TEXT
pub const CORPUS_EXPECTED: &str = "abbreviation\tterm\tcount
SNPC\tsubstantia nigra pars compacta\t1
TS\ttest string\t2
TS\ttime series\t1
inf\tinformative\t2";
