//! System instructions and message assembly for commit message generation.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Commit types the model may use.
pub const COMMIT_TYPES: [&str; 8] = [
    "feat", "fix", "perf", "docs", "style", "refactor", "test", "build",
];

/// Marker line that introduces the translated block in bilingual messages.
pub const TRANSLATION_MARKER: &str = "Indonesian translation:";

/// Which system instruction to send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptTemplate {
    /// English message followed by an Indonesian translation.
    #[default]
    Bilingual,
    /// English message only.
    English,
}

/// Role tag of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

const EXAMPLE_DIFF: &str = r#"diff --git a/README.md b/README.md
index 3b18e51..a1c2f9d 100644
--- a/README.md
+++ b/README.md
@@ -12,3 +12,7 @@ Chat with GPT-4 Turbo from the browser.
 ## Usage

 Run `npm start` and open the printed URL.
+
+## Links
+- [Web demo](https://gpt4-turbo-demo.example.com)
+- [Clarifai project](https://clarifai.com/example/gpt4-turbo)
"#;

const EXAMPLE_MESSAGE_EN: &str = "📝 docs(README): Add web demo and Clarifai project.
Adding links to the web demo and Clarifai project page to the documentation. Users can now access the GPT-4 Turbo demo application and view the Clarifai project through the provided links.";

const EXAMPLE_MESSAGE_ID: &str = "📝 docs(README): tambah demo web dan proyek Clarifai.
Menambahkan tautan demo web dan halaman proyek Clarifai ke dalam dokumentasi. Pengguna kini dapat mengakses demo aplikasi GPT-4 Turbo dan melihat proyek Clarifai melalui tautan yang disediakan.";

impl PromptTemplate {
    /// The system instruction text for this template.
    pub fn system_instruction(self) -> String {
        let types = COMMIT_TYPES.join(", ");

        match self {
            PromptTemplate::English => format!(
                r#"You are a commit message generator. Write a commit message in English for the given diff string.
You don't need to explain anything, just output the commit message. This is the schema:

---
<emoji> <type>(<scope>): <subject>
<body>
---

Allowed <type> values are {types}. Start the subject line with one emoji that fits the change.
The subject is a single line; the body is one short paragraph. Here's an example of a good commit message:

---
{EXAMPLE_MESSAGE_EN}
---"#
            ),
            PromptTemplate::Bilingual => format!(
                r#"You are a commit message generator. Write a commit message in English for the given diff string.
You don't need to explain anything, just output the commit message. "<subject>" and "<body>" are always in English first. This is the schema:

---
<emoji> <type>(<scope>): <subject>
<body>

{TRANSLATION_MARKER}

<emoji> <type>(<scope>): <subject>
<body>
---

Allowed <type> values are {types}. Start the subject line with one emoji that fits the change.
After writing the commit message, translate it to Indonesian and put the translation below the `{TRANSLATION_MARKER}` line. Here's an example of a good commit message:

---
{EXAMPLE_MESSAGE_EN}

{TRANSLATION_MARKER}

{EXAMPLE_MESSAGE_ID}
---"#
            ),
        }
    }

    /// The assistant reply used in the one-shot example exchange.
    fn example_reply(self) -> String {
        match self {
            PromptTemplate::English => EXAMPLE_MESSAGE_EN.to_string(),
            PromptTemplate::Bilingual => {
                format!("{EXAMPLE_MESSAGE_EN}\n\n{TRANSLATION_MARKER}\n\n{EXAMPLE_MESSAGE_ID}")
            }
        }
    }
}

/// Assemble the ordered messages for one request.
///
/// System instruction first, then (optionally) a fixed example exchange,
/// then the diff as the final user message.
pub fn build_messages(template: PromptTemplate, with_example: bool, diff: &str) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::new(Role::System, template.system_instruction())];

    if with_example {
        messages.push(ChatMessage::new(Role::User, EXAMPLE_DIFF));
        messages.push(ChatMessage::new(Role::Assistant, template.example_reply()));
    }

    messages.push(ChatMessage::new(Role::User, diff));
    messages
}
