//! Keyword dictionaries for table and column inference.
//!
//! Inference is literal word spotting: the first dictionary entry whose
//! keyword occurs in the (lower-cased) input wins. Entry order encodes
//! priority, so more specific words sit above generic ones.

/// Words that imply a table. Transaction and catalogue words sit above the
/// entity words: "average total per customer" is a question about orders
/// even though it names customers.
const TABLE_KEYWORDS: &[(&str, &str)] = &[
    ("order", "orders"),
    ("purchase", "orders"),
    ("sale", "orders"),
    ("invoice", "orders"),
    ("revenue", "orders"),
    ("total", "orders"),
    ("spend", "orders"),
    ("product", "products"),
    ("item", "products"),
    ("inventory", "products"),
    ("catalog", "products"),
    ("stock", "products"),
    ("price", "products"),
    ("customer", "customers"),
    ("client", "customers"),
    ("buyer", "customers"),
    ("shopper", "customers"),
];

/// Words that imply a column, per table.
const COLUMN_KEYWORDS: &[(&str, &[(&str, &str)])] = &[
    (
        "customers",
        &[
            ("phone", "phone"),
            ("telephone", "phone"),
            ("mobile", "phone"),
            ("email", "email"),
            ("mail", "email"),
            ("city", "city"),
            ("town", "city"),
            ("location", "city"),
            ("age", "age"),
            ("name", "name"),
        ],
    ),
    (
        "orders",
        &[
            ("total", "total"),
            ("amount", "total"),
            ("spend", "total"),
            ("revenue", "total"),
            ("status", "status"),
            ("state", "status"),
            ("customer", "customer_id"),
        ],
    ),
    (
        "products",
        &[
            ("price", "price"),
            ("cost", "price"),
            ("stock", "stock"),
            ("quantity", "stock"),
            ("availability", "stock"),
            ("name", "name"),
        ],
    ),
];

/// The table queried when nothing else gives one away.
pub(crate) const DEFAULT_TABLE: &str = "customers";

/// Infers a table from the input text, if any keyword occurs in it.
pub(crate) fn infer_table(text: &str) -> Option<&'static str> {
    TABLE_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, table)| *table)
}

/// Maps a word to a column of the given table. Unknown words map to
/// themselves via the caller, so this only resolves synonyms.
pub(crate) fn infer_column(table: &str, word: &str) -> Option<&'static str> {
    COLUMN_KEYWORDS
        .iter()
        .find(|(name, _)| *name == table)
        .and_then(|(_, columns)| {
            columns
                .iter()
                .find(|(keyword, _)| word.contains(keyword))
                .map(|(_, column)| *column)
        })
}
