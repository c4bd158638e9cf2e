use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One subject/grade combination as the catalog endpoint reports it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub grade: u32,
    #[serde(default)]
    pub questions_count: u32,
    pub has_enough_questions: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeSlot {
    pub grade: u32,
    pub id: i64,
    pub has_enough_questions: bool,
}

/// Subjects sharing a display name, with one slot per grade.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectGroup {
    pub name: String,
    pub grades: Vec<GradeSlot>,
}

impl SubjectGroup {
    /// Groups the catalog by subject name. Group order is first-seen name
    /// order and grade order is fetch order, so repeated loads render the
    /// same list.
    pub fn group_by_name(subjects: Vec<Subject>) -> Vec<SubjectGroup> {
        let mut groups: Vec<SubjectGroup> = Vec::new();
        for subject in subjects {
            let slot = GradeSlot {
                grade: subject.grade,
                id: subject.id,
                has_enough_questions: subject.has_enough_questions,
            };
            match groups.iter_mut().find(|g| g.name == subject.name) {
                Some(group) => group.grades.push(slot),
                None => groups.push(SubjectGroup {
                    name: subject.name,
                    grades: vec![slot],
                }),
            }
        }
        groups
    }

    /// True when at least one grade can produce a full test.
    pub fn has_available_grade(&self) -> bool {
        self.grades.iter().any(|g| g.has_enough_questions)
    }
}

/// Ordered mapping from option label ("A") to option text.
///
/// The wire shape is a JSON object; key order carries the display order,
/// and labels must be unique within a question. Both invariants are
/// enforced when deserializing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    entries: Vec<(String, String)>,
}

impl OptionSet {
    pub fn from_pairs<L, T>(pairs: impl IntoIterator<Item = (L, T)>) -> Option<Self>
    where
        L: Into<String>,
        T: Into<String>,
    {
        let mut set = OptionSet::default();
        for (label, text) in pairs {
            let label = label.into();
            if set.contains(&label) {
                return None;
            }
            set.entries.push((label, text.into()));
        }
        Some(set)
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, text)| text.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    /// Label/text pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for OptionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, text) in &self.entries {
            map.serialize_entry(label, text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OptionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OptionSetVisitor;

        impl<'de> Visitor<'de> for OptionSetVisitor {
            type Value = OptionSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from option label to option text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut set = OptionSet::default();
                while let Some((label, text)) = access.next_entry::<String, String>()? {
                    if set.contains(&label) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate option label `{label}`"
                        )));
                    }
                    set.entries.push((label, text));
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(OptionSetVisitor)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Question {
    pub id: i64,
    pub order_number: u32,
    pub question_text: String,
    pub options: OptionSet,
}

/// Aggregate score the backend computes for one submission.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub id: i64,
    pub score_percentage: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub rank: u32,
}

/// A question paired with what the participant chose and what was right.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResultQuestion {
    #[serde(flatten)]
    pub question: Question,
    pub user_answer: String,
    pub correct_answer: String,
}

impl ResultQuestion {
    pub fn is_correct(&self) -> bool {
        self.user_answer == self.correct_answer
    }

    pub fn chosen_text(&self) -> Option<&str> {
        self.question.options.get(&self.user_answer)
    }

    pub fn correct_text(&self) -> Option<&str> {
        self.question.options.get(&self.correct_answer)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubjectDetail {
    pub id: i64,
    pub name: String,
    pub grade: u32,
    #[serde(default)]
    pub topics: String,
}

/// Everything the submit endpoint returns for one scored test. Derived
/// data: built once per submission and never mutated afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    #[serde(rename = "result")]
    pub score: ScoreSummary,
    pub questions: Vec<ResultQuestion>,
    #[serde(rename = "subject_detail")]
    pub subject: SubjectDetail,
}

impl SubmissionResult {
    pub fn incorrect_questions(&self) -> impl Iterator<Item = &ResultQuestion> {
        self.questions.iter().filter(|q| !q.is_correct())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StudyTopic {
    pub name: String,
    pub desc: String,
}

/// Ordered study plan parsed out of the model's structured response.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StudyPlan {
    pub topics: Vec<StudyTopic>,
}

/// One row of the historical results listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResultListItem {
    pub id: i64,
    pub student_name: String,
    pub subject_name: String,
    pub grade: u32,
    pub score_percentage: f64,
    pub correct_answers: u32,
    pub total_questions: u32,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// One window of historical results. Recomputed on every page or filter
/// change, never cached across navigations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResultsPage {
    pub results: Vec<ResultListItem>,
    pub pagination: Pagination,
}

/// Which page of the flow the participant is on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    SubjectSelect,
    Test,
    Result,
    History,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::SubjectSelect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(id: i64, name: &str, grade: u32, available: bool) -> Subject {
        Subject {
            id,
            name: name.to_string(),
            grade,
            questions_count: 40,
            has_enough_questions: available,
        }
    }

    #[test]
    fn grouping_merges_grades_under_one_name() {
        let groups = SubjectGroup::group_by_name(vec![
            subject(1, "Math", 5, true),
            subject(2, "Math", 6, false),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Math");
        assert_eq!(groups[0].grades.len(), 2);
        assert!(groups[0].grades[0].has_enough_questions);
        assert!(!groups[0].grades[1].has_enough_questions);
        assert!(groups[0].has_available_grade());
    }

    #[test]
    fn grouping_keeps_first_seen_name_order() {
        let groups = SubjectGroup::group_by_name(vec![
            subject(1, "Physics", 7, true),
            subject(2, "Math", 5, true),
            subject(3, "Physics", 8, true),
        ]);

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Physics", "Math"]);
        assert_eq!(groups[0].grades.len(), 2);
    }

    #[test]
    fn option_set_preserves_wire_order() {
        let json = r#"{"B":"second","A":"first","C":"third"}"#;
        let options: OptionSet = serde_json::from_str(json).unwrap();

        let labels: Vec<&str> = options.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["B", "A", "C"]);
        assert_eq!(options.get("A"), Some("first"));
        assert!(options.contains("C"));
        assert!(!options.contains("D"));
    }

    #[test]
    fn option_set_rejects_duplicate_labels() {
        let json = r#"{"A":"first","A":"again"}"#;
        let parsed: Result<OptionSet, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn option_set_round_trips_through_json() {
        let options = OptionSet::from_pairs([("A", "x"), ("B", "y")]).unwrap();
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"A":"x","B":"y"}"#);
    }

    #[test]
    fn result_question_resolves_option_texts() {
        let question = ResultQuestion {
            question: Question {
                id: 9,
                order_number: 1,
                question_text: "2 + 2?".to_string(),
                options: OptionSet::from_pairs([("A", "3"), ("B", "4")]).unwrap(),
            },
            user_answer: "A".to_string(),
            correct_answer: "B".to_string(),
        };

        assert!(!question.is_correct());
        assert_eq!(question.chosen_text(), Some("3"));
        assert_eq!(question.correct_text(), Some("4"));
    }
}
