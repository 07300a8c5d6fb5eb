//! Help-center search and grouping.

use crate::model::HelpQuestion;

/// Questions whose text, answer or group contains `query`, ignoring case.
/// An empty query matches everything.
#[must_use]
pub fn filter_questions<'a>(questions: &'a [HelpQuestion], query: &str) -> Vec<&'a HelpQuestion> {
    let needle = query.to_lowercase();
    questions
        .iter()
        .filter(|q| {
            query.is_empty()
                || q.question.to_lowercase().contains(&needle)
                || q.answer.to_lowercase().contains(&needle)
                || q.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// A heading and its matching questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpGroup<'a> {
    /// Group heading.
    pub category: &'a str,
    /// Matching questions, in source order.
    pub questions: Vec<&'a HelpQuestion>,
}

/// Group matching questions by heading.
///
/// Headings follow their first appearance in `questions`; headings with no
/// match are left out.
#[must_use]
pub fn group_by_category<'a>(questions: &'a [HelpQuestion], query: &str) -> Vec<HelpGroup<'a>> {
    let matching = filter_questions(questions, query);

    let mut headings: Vec<&str> = Vec::new();
    for q in questions {
        if !headings.contains(&q.category.as_str()) {
            headings.push(&q.category);
        }
    }

    headings
        .into_iter()
        .filter_map(|category| {
            let questions: Vec<_> = matching
                .iter()
                .copied()
                .filter(|q| q.category == category)
                .collect();
            (!questions.is_empty()).then_some(HelpGroup {
                category,
                questions,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(id: &str, category: &str, question: &str, answer: &str) -> HelpQuestion {
        HelpQuestion {
            id: id.into(),
            question: question.into(),
            answer: answer.into(),
            category: category.into(),
        }
    }

    fn sample() -> Vec<HelpQuestion> {
        vec![
            q("1", "Account", "How do I sign in?", "Use the Sign in button."),
            q("2", "Sorting", "How does sorting work?", "By sender."),
            q("3", "Account", "Can I delete my account?", "Contact support."),
        ]
    }

    #[test]
    fn test_empty_query_matches_all() {
        assert_eq!(filter_questions(&sample(), "").len(), 3);
    }

    #[test]
    fn test_search_covers_answer_and_category() {
        let questions = sample();
        assert_eq!(filter_questions(&questions, "SUPPORT").len(), 1);
        assert_eq!(filter_questions(&questions, "sorting").len(), 1);
        assert_eq!(filter_questions(&questions, "account").len(), 2);
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let questions = sample();
        let groups = group_by_category(&questions, "");

        let headings: Vec<_> = groups.iter().map(|g| g.category).collect();
        assert_eq!(headings, vec!["Account", "Sorting"]);
        assert_eq!(groups[0].questions.len(), 2);
    }

    #[test]
    fn test_empty_groups_omitted() {
        let questions = sample();
        let groups = group_by_category(&questions, "sender");

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "Sorting");
    }
}
