use serde_json::json;

use vitals_retrieval::{PromptRow, QueryOutcome, RetrievalReport};

use crate::helpers::{open_session, three_hour_dataset};

#[tokio::test]
async fn prose_wrapped_reply_resolves_first_two_hours() {
    let (mut session, mock) = open_session(&three_hour_dataset());
    mock.queue_text(
        "Sure! Here is the JSON you asked for:\n\
         {\"health_ailment\": \"insomnia\", \"start_date\": \"2019-05-01T00:00:00\", \"end_date\": \"2019-05-02T00:00:00\"}\n\
         Let me know if you need anything else.",
    );

    let outcome = session
        .submit("I had trouble sleeping on May 1st and 2nd")
        .await;

    let QueryOutcome::Matched { query, records, elapsed } = outcome else {
        panic!("expected a match");
    };
    assert_eq!(query.ailment, "insomnia");
    assert_eq!(query.start.as_str(), "2019-05-01T00");
    assert_eq!(query.end.as_str(), "2019-05-02T00");
    assert_eq!(
        serde_json::to_value(&records).unwrap(),
        json!({
            "2019-05-01T00": {"sleep": 7.5},
            "2019-05-02T00": {"sleep": 6.0},
        })
    );

    let prompts = vec![
        PromptRow {
            prompt: "Could not sleep".into(),
            health_ailment: "Insomnia".into(),
            date: "2019-05-01T23:00:00".into(),
        },
        PromptRow {
            prompt: "Slept fine".into(),
            health_ailment: "insomnia".into(),
            date: "2019-05-10T00:00:00".into(),
        },
    ];
    let report = RetrievalReport::new(&query, records, elapsed, &prompts);
    assert_eq!(report.matching_prompts.len(), 1);
    assert_eq!(report.matching_prompts[0].prompt, "Could not sleep");

    assert_eq!(session.last_range().unwrap().records.len(), 2);
}

#[tokio::test]
async fn relative_query_is_anchored_at_dataset_end() {
    let (mut session, mock) = open_session(&three_hour_dataset());
    mock.queue_text(r#"{"health_ailment": "insomnia", "start_date": "2019-05-03T00", "end_date": "2019-05-10T00"}"#);

    let outcome = session.submit("insomnia for the past week").await;
    assert!(outcome.is_matched());

    let requests = mock.requests();
    assert!(requests[0].system.contains("set end_date to 2019-05-10T00."));
    assert_eq!(requests[0].prompt, "insomnia for the past week");
}

#[tokio::test]
async fn each_failure_class_has_its_own_message() {
    let (mut session, mock) = open_session(&three_hour_dataset());
    mock.queue_text(r#"{"health_ailment": "insomnia", "start_date": "2018-01-01T00", "end_date": "2018-01-02T00"}"#);
    mock.queue_text("The weather is nice.");
    mock.queue_error(vitals_llm::LlmError::ApiError {
        status: 404,
        body: "model 'llama3' not found".into(),
    });

    let mut messages = Vec::new();
    for q in ["insomnia last year", "hi", "insomnia"] {
        messages.push(session.submit(q).await.message());
    }
    assert!(messages[0].starts_with("No health data available"));
    assert!(messages[1].starts_with("Could not extract"));
    assert!(messages[2].starts_with("Language model is not available"));
    assert!(session.last_range().is_none());
}
