//! Demo dataset served by [`InMemoryActor::seeded`](super::InMemoryActor::seeded).

use crate::model::{EmailCategory, HelpQuestion, Message, SuggestedCategory};

const MINUTE: u64 = 60 * 1_000_000_000;
const HOUR: u64 = 60 * MINUTE;

/// Sample messages, received in the hours before `now` (nanoseconds).
#[must_use]
pub fn demo_messages(now: u64) -> Vec<Message> {
    let at = |ago: u64| now.saturating_sub(ago);

    vec![
        Message::new(
            "demo-1",
            "sarah.chen@acme.io",
            "Q3 roadmap review moved to Thursday",
            EmailCategory::Priority,
            at(12 * MINUTE),
        )
        .with_snippet("Hi team, the roadmap review is now Thursday at 10:00. Please bring your updated estimates.")
        .with_attachments(),
        Message::new(
            "demo-2",
            "billing@cloudhost.com",
            "Your invoice for October is ready",
            EmailCategory::Updates,
            at(45 * MINUTE),
        )
        .with_snippet("Invoice #48213 for $42.00 is now available in your billing dashboard.")
        .with_attachments(),
        Message::new(
            "demo-3",
            "deals@shopmart.com",
            "48 hours only: 30% off everything",
            EmailCategory::Promotions,
            at(2 * HOUR),
        )
        .with_snippet("Use code FALL30 at checkout. Offer ends Sunday at midnight."),
        Message::new(
            "demo-4",
            "notifications@linkedup.com",
            "You appeared in 14 searches this week",
            EmailCategory::Social,
            at(3 * HOUR),
        )
        .with_snippet("See who is looking at your profile and grow your network."),
        Message::new(
            "demo-5",
            "james.oduya@acme.io",
            "Re: Contract draft",
            EmailCategory::Priority,
            at(4 * HOUR),
        )
        .with_snippet("Legal signed off on sections 2 through 5. Only the indemnity clause is left.")
        .read()
        .starred(),
        Message::new(
            "demo-6",
            "rust-users@lists.example.org",
            "[rust-users] Async drop patterns",
            EmailCategory::Forums,
            at(5 * HOUR),
        )
        .with_snippet("Has anyone found a clean way to run async cleanup when a task is cancelled?"),
        Message::new(
            "demo-7",
            "no-reply@bank.example",
            "Statement available",
            EmailCategory::Updates,
            at(9 * HOUR),
        )
        .with_snippet("Your monthly statement is ready to view.")
        .read(),
        Message::new(
            "demo-8",
            "mom@family.net",
            "Dinner on Sunday?",
            EmailCategory::Inbox,
            at(20 * HOUR),
        )
        .with_snippet("We're thinking of making lasagna. Let me know if you can come!"),
        Message::new(
            "demo-9",
            "winner@lottery-prize.biz",
            "You have WON!!!",
            EmailCategory::Spam,
            at(26 * HOUR),
        )
        .with_snippet("Claim your prize now by replying with your bank details."),
        Message::new(
            "demo-10",
            "friends@photoshare.app",
            "Alex tagged you in 3 photos",
            EmailCategory::Social,
            at(30 * HOUR),
        )
        .with_snippet("Take a look and add a comment.")
        .read(),
        Message::new(
            "demo-11",
            "travel@airline.example",
            "Boarding pass for flight EM365",
            EmailCategory::Archive,
            at(72 * HOUR),
        )
        .with_snippet("Your boarding pass is attached. Gate closes 20 minutes before departure.")
        .read()
        .with_attachments(),
    ]
}

/// Suggestions offered on the categories settings tab.
#[must_use]
pub fn demo_suggested_categories() -> Vec<SuggestedCategory> {
    [
        ("finance", "Finance", "Bank statements, invoices and receipts"),
        ("travel", "Travel", "Bookings, boarding passes and itineraries"),
        ("work", "Work", "Mail from colleagues and clients"),
        ("shopping", "Shopping", "Orders, shipping and returns"),
        ("newsletters", "Newsletters", "Subscriptions you read later"),
        ("family", "Family", "Messages from people at home"),
    ]
    .into_iter()
    .map(|(id, name, description)| SuggestedCategory {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}

/// Help-center entries.
#[must_use]
pub fn demo_help_questions() -> Vec<HelpQuestion> {
    [
        (
            "q1",
            "Getting Started",
            "How does automatic sorting work?",
            "Email365 looks at the sender and content of each message and files it into a category. Turn sorting on from the home page.",
        ),
        (
            "q2",
            "Getting Started",
            "Do I need to link my Google account?",
            "Linking is optional. It lets Email365 sort mail that arrives in your Google inbox.",
        ),
        (
            "q3",
            "Categories",
            "Can I create my own categories?",
            "Yes. Open Settings, then Categories & Labels, and add a custom name or pick one of the suggestions.",
        ),
        (
            "q4",
            "Categories",
            "What happens when I remove a category?",
            "Messages stay where they are. The category is only removed from your preferences.",
        ),
        (
            "q5",
            "Account",
            "How do I change my name or email?",
            "Edit the fields under Settings, General. Changes are saved automatically after you stop typing.",
        ),
        (
            "q6",
            "Privacy",
            "Who can read my email?",
            "Only you. Sorting runs on your behalf and message contents are never shared.",
        ),
    ]
    .into_iter()
    .map(|(id, category, question, answer)| HelpQuestion {
        id: id.to_string(),
        question: question.to_string(),
        answer: answer.to_string(),
        category: category.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_demo_ids_unique() {
        let messages = demo_messages(100 * HOUR);
        let ids: HashSet<_> = messages.iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids.len(), messages.len());
    }

    #[test]
    fn test_demo_messages_are_in_the_past() {
        let now = 100 * HOUR;
        assert!(demo_messages(now).iter().all(|m| m.timestamp < now));
    }
}
