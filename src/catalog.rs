//! Built-in content tables: subjects, competency titles, activity title pools,
//! the cross-subject ("global") competency pool, and the default roster.
//!
//! These guarantee the backend serves a believable dataset even without any
//! external configuration.

/// Subjects taught in the demo school, in dashboard display order.
pub const SUBJECTS: &[&str] = &[
  "Wiskunde",
  "Nederlands",
  "Frans",
  "Engels",
  "Geschiedenis",
  "Aardrijkskunde",
  "Natuurwetenschappen",
  "Lichamelijke Opvoeding",
];

/// Main subjects get exactly one semester exam; the others get none.
pub const MAIN_SUBJECTS: &[&str] = &["Wiskunde", "Nederlands", "Frans", "Engels"];

pub fn is_main_subject(subject: &str) -> bool {
  MAIN_SUBJECTS.iter().any(|s| s.eq_ignore_ascii_case(subject))
}

/// Fixed note attached to every generated semester exam.
pub const EXAM_NOTE: &str =
  "Semesterexamen: telt zwaarder mee dan gewone evaluaties en wordt klassikaal besproken.";

/// A competency shared across several subjects, keyed by a stable global id.
pub struct GlobalCompetencyDef {
  pub global_id: &'static str,
  pub title: &'static str,
  pub subjects: &'static [&'static str],
}

impl GlobalCompetencyDef {
  pub fn applies_to(&self, subject: &str) -> bool {
    self.subjects.iter().any(|s| s.eq_ignore_ascii_case(subject))
  }
}

/// Cross-subject competency pool. Order matters: the first applicable three
/// are always included for a subject, the rest only sometimes.
pub const GLOBAL_COMPETENCIES: &[GlobalCompetencyDef] = &[
  GlobalCompetencyDef {
    global_id: "g-onderzoek",
    title: "Kan zelfstandig informatie opzoeken en beoordelen",
    subjects: &["Wiskunde", "Nederlands", "Geschiedenis", "Aardrijkskunde", "Natuurwetenschappen"],
  },
  GlobalCompetencyDef {
    global_id: "g-samenwerken",
    title: "Werkt constructief samen in groepsopdrachten",
    subjects: &["Nederlands", "Frans", "Engels", "Geschiedenis", "Lichamelijke Opvoeding"],
  },
  GlobalCompetencyDef {
    global_id: "g-presenteren",
    title: "Presenteert een uitgewerkt onderwerp voor de klas",
    subjects: &["Nederlands", "Frans", "Engels", "Geschiedenis", "Aardrijkskunde"],
  },
  GlobalCompetencyDef {
    global_id: "g-plannen",
    title: "Plant taken en respecteert deadlines",
    subjects: &[
      "Wiskunde", "Nederlands", "Frans", "Engels", "Natuurwetenschappen",
      "Lichamelijke Opvoeding",
    ],
  },
  GlobalCompetencyDef {
    global_id: "g-reflecteren",
    title: "Reflecteert over het eigen leerproces",
    subjects: &["Wiskunde", "Nederlands", "Frans", "Engels", "Geschiedenis", "Lichamelijke Opvoeding"],
  },
  GlobalCompetencyDef {
    global_id: "g-ict",
    title: "Zet digitale hulpmiddelen doelgericht in",
    subjects: &["Wiskunde", "Aardrijkskunde", "Natuurwetenschappen"],
  },
];

/// Subject-specific competency titles, cycled round-robin when a subject needs
/// more competencies than the table holds.
pub fn competency_titles(subject: &str) -> &'static [&'static str] {
  match subject {
    "Wiskunde" => &[
      "Lost eerstegraadsvergelijkingen op",
      "Rekent vlot met breuken en procenten",
      "Interpreteert grafieken en tabellen",
      "Past de stelling van Pythagoras toe",
      "Werkt nauwkeurig met meetkundige constructies",
      "Modelleert een vraagstuk wiskundig",
    ],
    "Nederlands" => &[
      "Schrijft een gestructureerde tekst",
      "Vat een zakelijke tekst correct samen",
      "Past spellingsregels consequent toe",
      "Analyseert een literair fragment",
      "Voert een overtuigend betoog",
    ],
    "Frans" => &[
      "Voert een eenvoudig gesprek in het Frans",
      "Begrijpt een authentieke luistertekst",
      "Vervoegt regelmatige werkwoorden correct",
      "Schrijft een korte informele brief",
      "Leest een aangepaste leestekst met begrip",
    ],
    "Engels" => &[
      "Holds a conversation about familiar topics",
      "Understands the gist of an authentic text",
      "Uses past and present tenses correctly",
      "Writes a structured short essay",
      "Gives a clear spoken presentation",
    ],
    "Geschiedenis" => &[
      "Plaatst gebeurtenissen op een tijdlijn",
      "Vergelijkt historische bronnen kritisch",
      "Verklaart oorzaak en gevolg van een conflict",
      "Herkent continuïteit en verandering",
    ],
    "Aardrijkskunde" => &[
      "Leest en interpreteert kaarten",
      "Verklaart klimaatverschillen tussen regio's",
      "Analyseert bevolkingsspreiding",
      "Herkent landschapsvormen op terreinfoto's",
    ],
    "Natuurwetenschappen" => &[
      "Voert een experiment veilig uit",
      "Noteert waarnemingen systematisch",
      "Verklaart een fenomeen met een model",
      "Trekt conclusies uit meetresultaten",
    ],
    "Lichamelijke Opvoeding" => &[
      "Toont inzet tijdens conditietraining",
      "Past spelregels correct toe",
      "Werkt veilig met toestellen",
      "Coacht een medeleerling bij een oefening",
    ],
    _ => GENERIC_COMPETENCY_TITLES,
  }
}

/// Fallback pool for unknown subjects. Generation never fails on bad input.
pub const GENERIC_COMPETENCY_TITLES: &[&str] = &[
  "Beheerst de basisleerstof van het vak",
  "Past de leerstof toe in een nieuwe context",
  "Toont inzicht in de vakterminologie",
  "Werkt opdrachten zelfstandig af",
  "Evalueert het eigen werk kritisch",
];

/// Title pools for regular activities; cycled by the activity generator.
pub const TEST_TITLES: &[&str] = &[
  "Herhalingstoets",
  "Toets hoofdstuk",
  "Instaptoets",
  "Toets na de vakantie",
  "Grote toets",
];

pub const ASSIGNMENT_TITLES: &[&str] = &[
  "Huistaak",
  "Groepsopdracht",
  "Onderzoeksopdracht",
  "Presentatieopdracht",
  "Portfolio-opdracht",
];

/// One class in the default roster.
pub struct RosterClassDef {
  pub name: &'static str,
  pub students: &'static [&'static str],
}

/// Built-in roster used when no TOML config provides one.
pub const DEFAULT_ROSTER: &[RosterClassDef] = &[
  RosterClassDef {
    name: "3A",
    students: &[
      "Lotte Peeters", "Noah Janssens", "Emma Maes", "Arthur Jacobs",
      "Olivia Willems", "Lucas Claes", "Mila Goossens", "Adam Wouters",
    ],
  },
  RosterClassDef {
    name: "3B",
    students: &[
      "Nora De Smet", "Louis Vermeulen", "Juul Desmet", "Finn Dubois",
      "Elena Martens", "Victor Peers", "Lina Aerts", "Kasper Segers",
    ],
  },
  RosterClassDef {
    name: "4A",
    students: &[
      "Marie Hermans", "Senne Pauwels", "Amber De Clercq", "Jules Lemmens",
      "Fleur Michiels", "Mats Van Damme", "Yara Declercq", "Stan Verhoeven",
    ],
  },
];

/// Lowercase ascii-ish slug for ids, mailto handles and avatar paths.
pub fn slug(s: &str) -> String {
  s.chars()
    .map(|c| if c.is_whitespace() { '.' } else { c.to_ascii_lowercase() })
    .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-')
    .collect()
}
