//! Deterministic text synthesis
//!
//! Every sentence is a pure function of `(topic, seed)`, where the seed is
//! derived from the document index and the position of the sentence within
//! one `synthesize` call. A fresh `StdRng` is created per sentence, so the
//! output never depends on call order or on the process-wide random source.
//!
//! Lengths are measured in characters (Unicode scalar values), not bytes.

use crate::constants::SEED_STRIDE;
use crate::phrase_bank::{
    SentenceTemplate, ADJECTIVES, CONNECTORS, OBJECTS, OUTCOMES, QUALIFIERS, SUBJECTS, VERBS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SENTENCE_SEPARATOR: &str = "\n\n";

/// Seed for one sentence. Wraps on overflow instead of panicking.
pub fn sentence_seed(document_index: u64, sentence_index: u64) -> u64 {
    document_index
        .wrapping_mul(SEED_STRIDE)
        .wrapping_add(sentence_index)
}

fn pick<'a, R: Rng>(rng: &mut R, table: &[&'a str]) -> &'a str {
    table[rng.gen_range(0..table.len())]
}

fn capitalize(sentence: String) -> String {
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => sentence,
    }
}

/// Build the sentence for `seed` around `topic`
pub fn synthesize_sentence(topic: &str, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let template = SentenceTemplate::ALL[rng.gen_range(0..SentenceTemplate::ALL.len())];

    let sentence = match template {
        SentenceTemplate::AdjectiveSubjectVerb => {
            let adjective = pick(&mut rng, ADJECTIVES);
            let subjects = pick(&mut rng, SUBJECTS);
            let verb = pick(&mut rng, VERBS);
            format!("{topic} remains a {adjective} field that {subjects} continue to {verb}.")
        }
        SentenceTemplate::SubjectVerbObjectQualifier => {
            let subjects = pick(&mut rng, SUBJECTS);
            let verb = pick(&mut rng, VERBS);
            let object = pick(&mut rng, OBJECTS);
            let qualifier = pick(&mut rng, QUALIFIERS);
            format!("{subjects} {verb} {object} of {topic} {qualifier}.")
        }
        SentenceTemplate::ConnectorOutcome => {
            let connector = pick(&mut rng, CONNECTORS);
            let outcome = pick(&mut rng, OUTCOMES);
            let qualifier = pick(&mut rng, QUALIFIERS);
            format!("The study of {topic} matters {connector} {outcome} {qualifier}.")
        }
        SentenceTemplate::QualifierAdjective => {
            let qualifier = pick(&mut rng, QUALIFIERS);
            let adjective = pick(&mut rng, ADJECTIVES);
            let subjects = pick(&mut rng, SUBJECTS);
            format!("{qualifier}, {topic} has proven {adjective} for {subjects}.")
        }
        SentenceTemplate::ObjectOfTopic => {
            let object = pick(&mut rng, OBJECTS);
            let subjects = pick(&mut rng, SUBJECTS);
            let verb = pick(&mut rng, VERBS);
            format!("Looking at {object} in {topic}, {subjects} tend to {verb} what others ignore.")
        }
        SentenceTemplate::OutcomeWhenSubjects => {
            let subjects = pick(&mut rng, SUBJECTS);
            let verb = pick(&mut rng, VERBS);
            let outcome = pick(&mut rng, OUTCOMES);
            format!("When {subjects} {verb} {topic}, {outcome}.")
        }
        SentenceTemplate::AdjectiveObject => {
            let adjective = pick(&mut rng, ADJECTIVES);
            let object = pick(&mut rng, OBJECTS);
            let qualifier = pick(&mut rng, QUALIFIERS);
            format!("Some of the most {adjective} work in {topic} focuses on {object} {qualifier}.")
        }
        SentenceTemplate::SubjectsAgree => {
            let subjects = pick(&mut rng, SUBJECTS);
            let adjective = pick(&mut rng, ADJECTIVES);
            let connector = pick(&mut rng, CONNECTORS);
            let outcome = pick(&mut rng, OUTCOMES);
            format!("Many {subjects} agree that {topic} is {adjective} {connector} {outcome}.")
        }
        SentenceTemplate::TopicConnector => {
            let outcome = pick(&mut rng, OUTCOMES);
            let connector = pick(&mut rng, CONNECTORS);
            let subjects = pick(&mut rng, SUBJECTS);
            format!("In {topic}, {outcome} {connector} {subjects} keep asking questions.")
        }
        SentenceTemplate::QualifierOutcome => {
            let qualifier = pick(&mut rng, QUALIFIERS);
            let outcome = pick(&mut rng, OUTCOMES);
            let subjects = pick(&mut rng, SUBJECTS);
            let verb = pick(&mut rng, VERBS);
            format!("{qualifier}, the lessons of {topic} show that {outcome}, and {subjects} {verb} them further.")
        }
    };

    capitalize(sentence)
}

/// Per-call sentence state. Owned by a single generation attempt.
#[derive(Debug, Clone)]
pub struct SynthesisContext {
    pub document_index: u64,
    pub sentence_counter: u64,
    pub topic: String,
}

impl SynthesisContext {
    pub fn new(topic: impl Into<String>, document_index: u64) -> Self {
        Self {
            document_index,
            sentence_counter: 0,
            topic: topic.into(),
        }
    }
}

impl Iterator for SynthesisContext {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let seed = sentence_seed(self.document_index, self.sentence_counter);
        self.sentence_counter = self.sentence_counter.wrapping_add(1);
        Some(synthesize_sentence(&self.topic, seed))
    }
}

/// Body of at least `target_len` characters. May overshoot by one sentence;
/// callers that need a hard cap truncate afterwards.
pub fn synthesize(topic: &str, document_index: u64, target_len: usize) -> String {
    let mut body = String::new();
    let mut body_len = 0;

    for sentence in SynthesisContext::new(topic, document_index) {
        if body_len >= target_len {
            break;
        }
        body_len += sentence.chars().count() + SENTENCE_SEPARATOR.len();
        body.push_str(&sentence);
        body.push_str(SENTENCE_SEPARATOR);
    }

    body
}
