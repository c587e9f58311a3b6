// Sample German resources in SentiWS layout
// WHY: Golden tests need small, hand-checkable lexicons

/// Stopwords, one per line (mixed case and blanks on purpose)
pub const STOPWORDS: &str = "der\ndie\ndas\nist\nund\nwir\nuns\nfür\ndieses\nein\nDer\n\ngar\n";

/// Negation markers
pub const NEGATIONS: &str = "nicht\nkein\nkeine\nnie\n";

/// Positive lexicon: lemma|POS<TAB>value<TAB>inflections
pub const POSITIVE_LEXICON: &str = "\
Gut|ADJX\t0.3716\tgute,guten,guter,gutes,besser,beste,besten
Idee|NN\t0.0040\tIdeen
Projekt|NN\t0.0040\tProjekte,Projekten
laufen|VVINF\t0.0040\tläuft,lief,liefen
geeignet|ADJX\t0.0040\tgeeignete,geeigneten
";

/// Negative lexicon
pub const NEGATIVE_LEXICON: &str = "\
schlecht|ADJX\t-0.7706\tschlechte,schlechten,schlechter
Untergang|NN\t-0.0048\tUntergänge
bevormunden|VVINF\t-0.3345\tbevormundet,bevormundete
ausschließen|VVINF\t-0.0048\tschliesst,schließt
";

/// Caption export with the default text column
pub const SVP_EXPORT: &str = "\
id,data.caption.text,data.like_count
1,Die E-ID ist die beste Idee.,120
2,\"Die Lösung ist nicht geeignet, gar nicht durchdacht.\",80
3,,5
";

/// Expected annotation of SVP_EXPORT
pub const SVP_EXPECTED: &str = "\
id,data.caption.text,data.like_count,sentiment_rulebased
1,Die E-ID ist die beste Idee.,120,0.38
2,\"Die Lösung ist nicht geeignet, gar nicht durchdacht.\",80,0.0
3,,5,0.0
";
