//! Question source contract and mapping of raw records into questions.

use crate::error::{MalformedRecordError, SourceError};
use crate::types::{CaseLabel, GenderLabel, NumberLabel, Question, Selection};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Something that can hand out batches of raw question records.
///
/// A short or empty batch is a legal answer; transport or payload problems
/// are reported as [`SourceError`].
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch up to `count` records matching `selection`. `count` is at least 1.
    async fn fetch_batch(
        &self,
        selection: &Selection,
        count: usize,
    ) -> Result<Vec<RawQuestion>, SourceError>;
}

/// Question record as delivered by the question service.
///
/// Every field is optional on the wire so a missing one can be reported by
/// name instead of failing the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub question_elements: Option<RawQuestionElements>,
    #[serde(default)]
    pub answer_elements: Option<RawAnswerElements>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuestionElements {
    #[serde(default)]
    pub noun_base_form: Option<String>,
    #[serde(default)]
    pub adj_base_form: Option<String>,
    #[serde(default)]
    pub noun_gender: Option<String>,
    #[serde(default)]
    pub target_number: Option<String>,
    #[serde(default)]
    pub target_case: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAnswerElements {
    #[serde(default)]
    pub noun_correct: Option<String>,
    #[serde(default)]
    pub adj_correct: Option<String>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, MalformedRecordError> {
    value.ok_or(MalformedRecordError::MissingField(field))
}

impl TryFrom<RawQuestion> for Question {
    type Error = MalformedRecordError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let question = raw
            .question_elements
            .ok_or(MalformedRecordError::MissingField("question_elements"))?;
        let answer = raw
            .answer_elements
            .ok_or(MalformedRecordError::MissingField("answer_elements"))?;

        let prompt_noun = required(question.noun_base_form, "question_elements.noun_base_form")?;
        let prompt_adjective = required(question.adj_base_form, "question_elements.adj_base_form")?;
        let gender = GenderLabel::from_code(&required(
            question.noun_gender,
            "question_elements.noun_gender",
        )?)?;

        let number = required(question.target_number, "question_elements.target_number")?;
        let target_number: NumberLabel = number
            .parse()
            .map_err(|_| MalformedRecordError::UnknownNumber(number))?;

        let case = required(question.target_case, "question_elements.target_case")?;
        let target_case: CaseLabel = case
            .parse()
            .map_err(|_| MalformedRecordError::UnknownCase(case))?;

        let noun_correct = required(answer.noun_correct, "answer_elements.noun_correct")?;
        let adj_correct = required(answer.adj_correct, "answer_elements.adj_correct")?;

        Ok(Question {
            prompt_noun,
            prompt_adjective,
            gender,
            target_number,
            target_case,
            expected_answer: format!("{noun_correct} {adj_correct}"),
        })
    }
}

/// Map a whole batch. Fails on the first bad record and keeps nothing.
pub fn questions_from_records(records: Vec<RawQuestion>) -> Result<Vec<Question>, SourceError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            Question::try_from(raw).map_err(|source| SourceError::Malformed { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record() -> serde_json::Value {
        json!({
            "question_elements": {
                "noun_base_form": "pies",
                "adj_base_form": "dobry",
                "noun_gender": "m anim",
                "target_number": "plural",
                "target_case": "genitive"
            },
            "answer_elements": {
                "noun_correct": "psów",
                "adj_correct": "dobrych"
            }
        })
    }

    fn parse(value: serde_json::Value) -> RawQuestion {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn maps_complete_record() {
        let question = Question::try_from(parse(record())).unwrap();
        assert_eq!(
            question,
            Question {
                prompt_noun: "pies".to_string(),
                prompt_adjective: "dobry".to_string(),
                gender: GenderLabel::MasculineAnimate,
                target_number: NumberLabel::Plural,
                target_case: CaseLabel::Genitive,
                expected_answer: "psów dobrych".to_string(),
            }
        );
    }

    #[test]
    fn ignores_unknown_fields() {
        let mut value = record();
        value["question_elements"]["id"] = json!(42);
        value["extra"] = json!("ignored");
        assert!(Question::try_from(parse(value)).is_ok());
    }

    #[test]
    fn reports_missing_field_by_path() {
        let mut value = record();
        value["answer_elements"]
            .as_object_mut()
            .unwrap()
            .remove("adj_correct");

        assert_eq!(
            Question::try_from(parse(value)),
            Err(MalformedRecordError::MissingField("answer_elements.adj_correct"))
        );
    }

    #[test]
    fn reports_missing_section() {
        let value = json!({ "answer_elements": { "noun_correct": "a", "adj_correct": "b" } });
        assert_eq!(
            Question::try_from(parse(value)),
            Err(MalformedRecordError::MissingField("question_elements"))
        );
    }

    #[test]
    fn rejects_unknown_codes() {
        let mut value = record();
        value["question_elements"]["noun_gender"] = json!("m");
        assert_eq!(
            Question::try_from(parse(value)),
            Err(MalformedRecordError::UnknownGender("m".to_string()))
        );

        let mut value = record();
        value["question_elements"]["target_case"] = json!("ablative");
        assert_eq!(
            Question::try_from(parse(value)),
            Err(MalformedRecordError::UnknownCase("ablative".to_string()))
        );

        let mut value = record();
        value["question_elements"]["target_number"] = json!("dual");
        assert_eq!(
            Question::try_from(parse(value)),
            Err(MalformedRecordError::UnknownNumber("dual".to_string()))
        );
    }

    #[test]
    fn batch_mapping_is_all_or_nothing() {
        let good = parse(record());
        let bad = RawQuestion::default();

        let result = questions_from_records(vec![good.clone(), bad, good.clone()]);
        assert!(matches!(
            result,
            Err(SourceError::Malformed {
                index: 1,
                source: MalformedRecordError::MissingField("question_elements"),
            })
        ));

        let questions = questions_from_records(vec![good.clone(), good]).unwrap();
        assert_eq!(questions.len(), 2);
    }
}
