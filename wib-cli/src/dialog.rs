use std::io::{self, BufRead, BufReader, Write};
use std::sync::Mutex;

use workitem_branch::{BranchDialog, BranchDialogRequest, BranchDialogResult};

/// Branch dialog on the terminal. Reads answers line by line; EOF cancels.
pub struct TerminalDialog {
    input: Mutex<Box<dyn BufRead + Send>>,
    output: Mutex<Box<dyn Write + Send>>,
}

impl TerminalDialog {
    pub fn new(input: Box<dyn BufRead + Send>, output: Box<dyn Write + Send>) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    pub fn stdio() -> Self {
        Self::new(Box::new(BufReader::new(io::stdin())), Box::new(io::stderr()))
    }

    fn ask(&self, question: &str) -> Option<String> {
        {
            let mut output = self.output.lock().ok()?;
            write!(output, "{question}").ok()?;
            output.flush().ok()?;
        }

        let mut line = String::new();
        let read = self.input.lock().ok()?.read_line(&mut line).ok()?;
        if read == 0 {
            return None;
        }
        Some(line.trim().to_owned())
    }

    fn ask_yes_no(&self, question: &str, default: bool) -> Option<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        let answer = self.ask(&format!("{question} [{hint}] "))?;
        match answer.to_ascii_lowercase().as_str() {
            "" => Some(default),
            "y" | "yes" => Some(true),
            "n" | "no" => Some(false),
            _ => None,
        }
    }
}

impl BranchDialog for TerminalDialog {
    fn show(&self, request: &BranchDialogRequest) -> Option<BranchDialogResult> {
        let ids = request
            .work_item_ids
            .iter()
            .map(|id| format!("#{id}"))
            .collect::<Vec<_>>()
            .join(", ");

        let name = self.ask(&format!(
            "Branch for {ids} [{}] ('.' cancels): ",
            request.suggested_name
        ))?;
        let branch_name = match name.as_str() {
            "." => return None,
            "" => request.suggested_name.clone(),
            _ => name,
        };

        let source = self.ask(&format!("Based on [{}]: ", request.source_ref))?;
        let source_ref = if source.is_empty() {
            request.source_ref.clone()
        } else {
            source
        };

        let checkout = self.ask_yes_no("Check out locally?", request.checkout)?;

        if !self.ask_yes_no(
            &format!("Create {branch_name} from {source_ref}?"),
            true,
        )? {
            return None;
        }

        Some(BranchDialogResult {
            branch_name,
            source_ref,
            checkout,
        })
    }
}
