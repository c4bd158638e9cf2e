use serde_json::{Value, json};

use crate::model::{ResultQuestion, ScoreSummary, SubjectDetail};

/// Renders the tutoring prompt for one scored test. Pure: the same
/// inputs always produce the same string, one question/answer/correction
/// triple per incorrect answer.
pub fn build_prompt(
    subject: &SubjectDetail,
    score: &ScoreSummary,
    incorrect: &[&ResultQuestion],
) -> String {
    let triples = incorrect
        .iter()
        .map(|q| {
            format!(
                "- Question: \"{}\"\n  - Your Answer: \"{}\"\n  - Correct Answer: \"{}\"",
                q.question.question_text,
                q.chosen_text().unwrap_or("Not answered"),
                q.correct_text().unwrap_or(""),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let topics_line = if subject.topics.trim().is_empty() {
        String::new()
    } else {
        format!("- Topics: {}\n", subject.topics.trim())
    };

    format!(
        "You are an expert tutor. A student has just completed a test. Analyze their results and provide a study plan.\n\
         \n\
         Test data:\n\
         - Subject: {name}\n\
         - Grade: {grade}\n\
         {topics_line}\
         - Final Score: {percentage}% ({correct} out of {total} correct)\n\
         - Incorrectly answered questions:\n\
         {triples}\n\
         \n\
         Based on these incorrect answers, identify key topics to study. For each topic, explain the core concept.\n\
         Be encouraging and constructive. Return all information only in Karakalpak language.",
        name = subject.name,
        grade = subject.grade,
        topics_line = topics_line,
        percentage = score.score_percentage,
        correct = score.correct_answers,
        total = score.total_questions,
        triples = triples,
    )
}

/// Response schema sent with every generation request: an ordered topic
/// list where both fields are required.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "topics": {
                "type": "ARRAY",
                "description": "A list of key topics the student needs to study, in Karakalpak language.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {
                            "type": "STRING",
                            "description": "The name of the topic to study."
                        },
                        "desc": {
                            "type": "STRING",
                            "description": "Explanation of the core concept of the topic."
                        }
                    },
                    "required": ["name", "desc"]
                }
            }
        },
        "required": ["topics"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OptionSet, Question};

    fn incorrect_question(id: i64) -> ResultQuestion {
        ResultQuestion {
            question: Question {
                id,
                order_number: id as u32,
                question_text: format!("What is {id} + {id}?"),
                options: OptionSet::from_pairs([("A", "wrong"), ("B", "right")]).unwrap(),
            },
            user_answer: "A".to_string(),
            correct_answer: "B".to_string(),
        }
    }

    fn subject(topics: &str) -> SubjectDetail {
        SubjectDetail {
            id: 3,
            name: "Math".to_string(),
            grade: 5,
            topics: topics.to_string(),
        }
    }

    fn score() -> ScoreSummary {
        ScoreSummary {
            id: 1,
            score_percentage: 40.0,
            total_questions: 5,
            correct_answers: 2,
            rank: 9,
        }
    }

    #[test]
    fn prompt_embeds_one_triple_per_incorrect_answer() {
        let questions: Vec<ResultQuestion> = (1..=3).map(incorrect_question).collect();
        let refs: Vec<&ResultQuestion> = questions.iter().collect();

        let prompt = build_prompt(&subject(""), &score(), &refs);
        assert_eq!(prompt.matches("- Question:").count(), 3);
        assert_eq!(prompt.matches("- Your Answer: \"wrong\"").count(), 3);
        assert_eq!(prompt.matches("- Correct Answer: \"right\"").count(), 3);
        assert!(prompt.contains("- Subject: Math"));
        assert!(prompt.contains("- Grade: 5"));
        assert!(prompt.contains("40% (2 out of 5 correct)"));
    }

    #[test]
    fn topic_hints_appear_only_when_present() {
        let questions = [incorrect_question(1)];
        let refs: Vec<&ResultQuestion> = questions.iter().collect();

        let with = build_prompt(&subject("algebra, geometry"), &score(), &refs);
        assert!(with.contains("- Topics: algebra, geometry"));

        let without = build_prompt(&subject("  "), &score(), &refs);
        assert!(!without.contains("- Topics:"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let questions = [incorrect_question(1), incorrect_question(2)];
        let refs: Vec<&ResultQuestion> = questions.iter().collect();

        let a = build_prompt(&subject("algebra"), &score(), &refs);
        let b = build_prompt(&subject("algebra"), &score(), &refs);
        assert_eq!(a, b);
    }

    #[test]
    fn schema_requires_both_topic_fields() {
        let schema = response_schema();
        assert_eq!(schema["required"][0], "topics");
        let required = &schema["properties"]["topics"]["items"]["required"];
        assert_eq!(required[0], "name");
        assert_eq!(required[1], "desc");
    }
}
