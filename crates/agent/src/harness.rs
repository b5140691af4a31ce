//! JSON-lines tool-call loop
//!
//! One request per line (`{"function": ..., "argument": {...}}`), one reply
//! per line. Blank lines are skipped. A line that does not parse, or a call
//! the session rejects, is answered with `{"error": ...}` and the loop
//! carries on with the same session.

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};

use crate::session::{ServiceSession, ToolRequest};

/// Serve requests from `reader` until EOF, writing replies to `writer`.
///
/// Returns the number of requests answered.
pub fn run<R: BufRead, W: Write>(
    session: &mut ServiceSession,
    reader: R,
    mut writer: W,
) -> io::Result<usize> {
    let mut answered = 0;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = reply_to(session, &line);
        writeln!(writer, "{}", reply)?;
        writer.flush()?;
        answered += 1;
    }

    Ok(answered)
}

fn reply_to(session: &mut ServiceSession, line: &str) -> Value {
    let request = match serde_json::from_str::<ToolRequest>(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Unparseable tool request");
            return json!({ "error": format!("invalid request: {}", e) });
        }
    };

    match session.handle(request) {
        Ok(result) => result.to_json(),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceAgent;
    use std::io::Cursor;

    fn replies(output: Vec<u8>) -> Vec<Value> {
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let agent = ServiceAgent::with_defaults().unwrap();
        let mut session = agent.start_session();

        let input = concat!(
            "not json\n",
            "{\"function\": \"transfer_call\", \"argument\": {}}\n",
            "{\"function\": \"identify_customer\", \"argument\": {\"phone\": \"+15551234567\"}}\n",
        );
        let mut output = Vec::new();
        let answered = run(&mut session, Cursor::new(input), &mut output).unwrap();

        assert_eq!(answered, 3);
        let replies = replies(output);
        assert_eq!(replies.len(), 3);
        assert!(replies[0]["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid request"));
        assert!(replies[1]["error"].as_str().unwrap().contains("transfer_call"));
        assert!(replies[2]["response"].as_str().unwrap().contains("John Smith"));
        assert_eq!(
            replies[2]["action"][0]["set_global_data"]["customer_id"],
            "C001"
        );

        assert!(session.state().is_identified());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let agent = ServiceAgent::with_defaults().unwrap();
        let mut session = agent.start_session();

        let mut output = Vec::new();
        let answered = run(&mut session, Cursor::new("\n   \n\t\n"), &mut output).unwrap();

        assert_eq!(answered, 0);
        assert!(output.is_empty());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_state_carries_across_lines() {
        let agent = ServiceAgent::with_defaults().unwrap();
        let mut session = agent.start_session();

        let input = concat!(
            "{\"function\": \"create_ticket\", \"argument\": {\"issue\": \"login failure\"}}\n",
            "\n",
            "{\"function\": \"add_ticket_note\", \"arguments\": {\"note\": \"tried reset\"}}\n",
            "{\"function\": \"get_ticket_summary\"}\n",
        );
        let mut output = Vec::new();
        run(&mut session, Cursor::new(input), &mut output).unwrap();

        let replies = replies(output);
        assert_eq!(replies.len(), 3);
        assert!(replies[1]["response"]
            .as_str()
            .unwrap()
            .ends_with("Total notes: 1."));
        assert!(replies[2]["response"]
            .as_str()
            .unwrap()
            .contains("login failure. 1 note(s) added."));
        assert!(replies[2].get("action").is_none());
    }
}
