// ABOUTME: Built-in demo deck for the slidemark application
// ABOUTME: Shows every supported Markdown construct and is used by the `demo` command

/// Markdown source of the demo presentation.
pub const DEMO_MARKDOWN: &str = r#"# The Art of the Prompt

## Welcome

Training on good prompting practices with AI

---

## Set the frame

- **Give a role**: state the posture you expect from the AI
- **Give context**: more information means a better answer
- **State the constraints**: format, length, tone

---

## Clarify the expected format

- Specify the output format you want
- Structure with clear separators
- Give concrete examples
- Use lists to organise ideas

---

## Improve answer quality

**Iterate and refine** your prompts step by step

**Be precise and clear** in your requests

**Give context** with relevant examples

---

## Good practices

- Start simple, then add detail
- Test and adjust your prompts
- Ask for explanations when needed
- Use `precise` vocabulary

---

## Thank you!

Questions?

*Built on [Reveal.js](https://revealjs.com)*"#;
