//! Phrase fragments used by the text synthesizer

pub const ADJECTIVES: &[&str] = &[
    "fundamental",
    "remarkable",
    "intricate",
    "widely studied",
    "often overlooked",
    "surprisingly simple",
    "historically significant",
    "rapidly evolving",
    "deeply interconnected",
    "practical",
    "elegant",
    "foundational",
];

pub const SUBJECTS: &[&str] = &[
    "researchers",
    "students",
    "historians",
    "engineers",
    "educators",
    "analysts",
    "practitioners",
    "early pioneers",
    "modern scholars",
    "curious learners",
    "independent investigators",
];

pub const VERBS: &[&str] = &[
    "examine",
    "explore",
    "reinterpret",
    "question",
    "document",
    "illustrate",
    "compare",
    "measure",
    "challenge",
    "refine",
    "connect",
];

pub const OBJECTS: &[&str] = &[
    "the underlying principles",
    "long-standing assumptions",
    "practical applications",
    "recurring patterns",
    "the broader context",
    "competing explanations",
    "subtle relationships",
    "the historical record",
    "everyday examples",
    "open questions",
    "measurable outcomes",
];

pub const CONNECTORS: &[&str] = &[
    "because",
    "while",
    "even though",
    "since",
    "whenever",
    "as long as",
    "although",
    "given that",
    "so that",
    "until",
    "provided that",
];

pub const OUTCOMES: &[&str] = &[
    "new insights continue to emerge",
    "our understanding keeps deepening",
    "earlier models need revision",
    "unexpected connections appear",
    "the evidence grows stronger",
    "careful observation pays off",
    "simple rules explain complex behavior",
    "practice and theory converge",
    "old debates gain fresh relevance",
    "the details matter more than expected",
    "shared vocabulary makes progress easier",
];

pub const QUALIFIERS: &[&str] = &[
    "in many cases",
    "over the last century",
    "across different cultures",
    "in everyday life",
    "at every scale",
    "in classrooms and laboratories",
    "with growing precision",
    "in surprising ways",
    "under careful scrutiny",
    "more than ever before",
    "from several perspectives",
];

/// Sentence shapes; each interpolates three or four fragments around the topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceTemplate {
    AdjectiveSubjectVerb,
    SubjectVerbObjectQualifier,
    ConnectorOutcome,
    QualifierAdjective,
    ObjectOfTopic,
    OutcomeWhenSubjects,
    AdjectiveObject,
    SubjectsAgree,
    TopicConnector,
    QualifierOutcome,
}

impl SentenceTemplate {
    pub const ALL: [SentenceTemplate; 10] = [
        SentenceTemplate::AdjectiveSubjectVerb,
        SentenceTemplate::SubjectVerbObjectQualifier,
        SentenceTemplate::ConnectorOutcome,
        SentenceTemplate::QualifierAdjective,
        SentenceTemplate::ObjectOfTopic,
        SentenceTemplate::OutcomeWhenSubjects,
        SentenceTemplate::AdjectiveObject,
        SentenceTemplate::SubjectsAgree,
        SentenceTemplate::TopicConnector,
        SentenceTemplate::QualifierOutcome,
    ];
}

/// Topics used when every remote source fails
pub const FALLBACK_TOPICS: &[&str] = &[
    "Astronomy",
    "Biology",
    "Chemistry",
    "Economics",
    "Geography",
    "History",
    "Literature",
    "Mathematics",
    "Music",
    "Philosophy",
    "Physics",
    "Psychology",
];
