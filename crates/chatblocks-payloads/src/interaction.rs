//! Typed read access over a received interaction payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use chatblocks_core::list::BlockList;
use chatblocks_types::error::ReconstructError;

use crate::error::PayloadError;
use crate::metadata;

/// The type of an inbound interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// An interactive element was used (button, select, overflow).
    BlockActions,
    /// A modal's submit button was pressed.
    ViewSubmission,
    /// A modal was closed with notify-on-close set.
    ViewClosed,
}

impl InteractionKind {
    fn from_wire(kind: &str) -> Option<Self> {
        match kind {
            "block_actions" => Some(Self::BlockActions),
            "view_submission" => Some(Self::ViewSubmission),
            "view_closed" => Some(Self::ViewClosed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BlockActions => "block_actions",
            Self::ViewSubmission => "view_submission",
            Self::ViewClosed => "view_closed",
        }
    }
}

/// The chosen entry of a submitted select element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub text: String,
    pub value: String,
}

/// A received interaction payload.
///
/// Wraps the raw tree; accessors return `None` rather than failing when
/// a payload variant simply does not carry the requested data (a message
/// interaction has no view, a view interaction has no channel).
#[derive(Debug, Clone)]
pub struct Interaction {
    kind: InteractionKind,
    payload: Value,
}

impl Interaction {
    /// Wrap a decoded payload tree, checking its interaction type.
    pub fn from_value(payload: Value) -> Result<Self, PayloadError> {
        let kind = payload
            .get("type")
            .and_then(Value::as_str)
            .ok_or(PayloadError::MissingField("type"))?;
        let kind = InteractionKind::from_wire(kind)
            .ok_or_else(|| PayloadError::UnknownKind(kind.to_string()))?;
        Ok(Self { kind, payload })
    }

    /// Decode a payload from its JSON text form.
    pub fn from_json(text: &str) -> Result<Self, PayloadError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn kind(&self) -> InteractionKind {
        self.kind
    }

    pub fn is_block_actions(&self) -> bool {
        self.kind == InteractionKind::BlockActions
    }

    pub fn is_view_submission(&self) -> bool {
        self.kind == InteractionKind::ViewSubmission
    }

    pub fn is_view_closed(&self) -> bool {
        self.kind == InteractionKind::ViewClosed
    }

    /// Id of the user who triggered the interaction.
    pub fn user_id(&self) -> Option<&str> {
        self.lookup("user.id").and_then(Value::as_str)
    }

    /// Trigger id for opening a follow-up view.
    pub fn trigger_id(&self) -> Option<&str> {
        self.payload.get("trigger_id").and_then(Value::as_str)
    }

    /// The embedded view, when the interaction carries one.
    pub fn view(&self) -> Option<&Map<String, Value>> {
        self.payload.get("view").and_then(Value::as_object)
    }

    /// Whether the embedded view is a home tab.
    pub fn view_is_home(&self) -> bool {
        self.lookup("view.type").and_then(Value::as_str) == Some("home")
    }

    /// The embedded view's private metadata, decoded from its `k=v&k=v`
    /// form. `None` when there is no view or no metadata.
    pub fn private_metadata(&self) -> Option<BTreeMap<String, String>> {
        let text = self.lookup("view.private_metadata").and_then(Value::as_str)?;
        if text.is_empty() {
            return None;
        }
        Some(metadata::decode(text))
    }

    /// Raw block trees of the interaction: the view's blocks for view
    /// interactions, the message's blocks for message interactions.
    pub fn blocks(&self) -> &[Value] {
        self.lookup("view.blocks")
            .or_else(|| self.lookup("message.blocks"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Reconstruct the interaction's blocks into the block graph.
    /// All-or-nothing, per the aggregate reconstruction contract.
    pub fn reconstruct_blocks(&self) -> Result<BlockList, ReconstructError> {
        BlockList::reconstruct(self.blocks())
    }

    /// The raw block tree whose stored `block_id` contains `block_id`.
    /// Containment rather than equality because generated ids are often
    /// suffixed with a uniquifier.
    pub fn find_block(&self, block_id: &str) -> Option<&Map<String, Value>> {
        self.blocks()
            .iter()
            .filter_map(Value::as_object)
            .find(|tree| {
                tree.get("block_id")
                    .and_then(Value::as_str)
                    .is_some_and(|id| id.contains(block_id))
            })
    }

    /// Action id of the element that triggered a block-actions payload.
    pub fn action_id(&self) -> Result<&str, PayloadError> {
        self.first_action_field("action_id")
    }

    /// Value carried by the triggering element.
    pub fn action_value(&self) -> Result<&str, PayloadError> {
        self.first_action_field("value")
    }

    /// Element type of the triggering element (button, static_select...).
    pub fn action_element_type(&self) -> Result<&str, PayloadError> {
        self.first_action_field("type")
    }

    /// The submitted element state for `(block_id, action_id)`.
    ///
    /// View submissions carry state under `view.state.values`; block
    /// actions carry the triggering elements in the `actions` array.
    pub fn input_value(&self, block_id: &str, action_id: &str) -> Option<&Value> {
        tracing::debug!(block_id, action_id, "looking up submitted input");
        match self.kind {
            InteractionKind::ViewSubmission | InteractionKind::ViewClosed => self
                .lookup("view.state.values")
                .and_then(|values| values.get(block_id))
                .and_then(|block| block.get(action_id)),
            InteractionKind::BlockActions => self
                .payload
                .get("actions")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .find(|action| {
                    action.get("block_id").and_then(Value::as_str) == Some(block_id)
                        && action.get("action_id").and_then(Value::as_str) == Some(action_id)
                }),
        }
    }

    /// Text and value of the chosen entry of a submitted select element.
    pub fn select_value(
        &self,
        block_id: &str,
        action_id: &str,
    ) -> Result<SelectedOption, PayloadError> {
        let element = self.checked_element(block_id, action_id, "static_select")?;
        let chosen = element
            .get("selected_option")
            .ok_or(PayloadError::MissingField("selected_option"))?;
        let text = chosen
            .get("text")
            .and_then(|t| t.get("text"))
            .and_then(Value::as_str)
            .ok_or(PayloadError::MissingField("selected_option.text"))?;
        let value = chosen
            .get("value")
            .and_then(Value::as_str)
            .ok_or(PayloadError::MissingField("selected_option.value"))?;
        Ok(SelectedOption {
            text: text.to_string(),
            value: value.to_string(),
        })
    }

    /// Submitted value of a freeform text input element.
    pub fn text_input_value(
        &self,
        block_id: &str,
        action_id: &str,
    ) -> Result<&str, PayloadError> {
        let element = self.checked_element(block_id, action_id, "plain_text_input")?;
        element
            .get("value")
            .and_then(Value::as_str)
            .ok_or(PayloadError::MissingField("value"))
    }

    /// Timestamp of the message a message interaction started from.
    pub fn message_ts(&self) -> Option<&str> {
        self.lookup("container.message_ts").and_then(Value::as_str)
    }

    /// Id of the channel a message interaction started from.
    pub fn channel_id(&self) -> Option<&str> {
        self.lookup("channel.id").and_then(Value::as_str)
    }

    /// Name of the channel a message interaction started from.
    pub fn channel_name(&self) -> Option<&str> {
        self.lookup("channel.name").and_then(Value::as_str)
    }

    fn first_action_field(&self, field: &'static str) -> Result<&str, PayloadError> {
        self.payload
            .get("actions")
            .and_then(Value::as_array)
            .and_then(|actions| actions.first())
            .ok_or(PayloadError::MissingField("actions"))?
            .get(field)
            .and_then(Value::as_str)
            .ok_or(PayloadError::MissingField(field))
    }

    fn checked_element(
        &self,
        block_id: &str,
        action_id: &str,
        expected: &'static str,
    ) -> Result<&Value, PayloadError> {
        let element =
            self.input_value(block_id, action_id)
                .ok_or_else(|| PayloadError::MissingInput {
                    block_id: block_id.to_string(),
                    action_id: action_id.to_string(),
                })?;
        let found = element.get("type").and_then(Value::as_str).unwrap_or("");
        if found != expected {
            return Err(PayloadError::WrongElementType {
                expected,
                found: found.to_string(),
            });
        }
        Ok(element)
    }

    /// Walk a dot-separated path through the payload tree.
    fn lookup(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.payload, |node, segment| node.get(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission_payload() -> Value {
        json!({
            "type": "view_submission",
            "user": {"id": "U123", "name": "ada"},
            "trigger_id": "trig.1",
            "view": {
                "type": "modal",
                "private_metadata": "origin=home&ticket=T-42",
                "blocks": [
                    {"type": "divider", "block_id": "div-1"},
                    {
                        "type": "input",
                        "block_id": "name-block.suffix",
                        "label": {"type": "plain_text", "text": "Name", "emoji": false},
                        "element": {"type": "plain_text_input", "action_id": "name"},
                    },
                ],
                "state": {
                    "values": {
                        "name-block": {
                            "name": {"type": "plain_text_input", "value": "Ada"},
                        },
                        "menu-block": {
                            "pick": {
                                "type": "static_select",
                                "selected_option": {
                                    "text": {"type": "plain_text", "text": "First", "emoji": false},
                                    "value": "v1",
                                },
                            },
                        },
                    },
                },
            },
        })
    }

    fn block_actions_payload() -> Value {
        json!({
            "type": "block_actions",
            "user": {"id": "U456"},
            "trigger_id": "trig.2",
            "channel": {"id": "C1", "name": "general"},
            "container": {"message_ts": "1712.0001"},
            "message": {
                "blocks": [{"type": "divider", "block_id": "div-9"}],
            },
            "actions": [{
                "type": "button",
                "block_id": "actions-1",
                "action_id": "go",
                "value": "clicked",
            }],
        })
    }

    #[test]
    fn test_kind_detection() {
        let interaction = Interaction::from_value(submission_payload()).unwrap();
        assert_eq!(interaction.kind(), InteractionKind::ViewSubmission);
        assert!(interaction.is_view_submission());
        assert!(!interaction.is_block_actions());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = Interaction::from_value(json!({"type": "app_mention"})).unwrap_err();
        assert_eq!(err.to_string(), "unknown interaction type `app_mention`");

        let err = Interaction::from_value(json!({"ok": true})).unwrap_err();
        assert!(matches!(err, PayloadError::MissingField("type")));
    }

    #[test]
    fn test_actor_and_trigger_accessors() {
        let interaction = Interaction::from_value(submission_payload()).unwrap();
        assert_eq!(interaction.user_id(), Some("U123"));
        assert_eq!(interaction.trigger_id(), Some("trig.1"));
    }

    #[test]
    fn test_view_access_and_metadata() {
        let interaction = Interaction::from_value(submission_payload()).unwrap();
        assert!(interaction.view().is_some());
        assert!(!interaction.view_is_home());

        let metadata = interaction.private_metadata().unwrap();
        assert_eq!(metadata.get("ticket").map(String::as_str), Some("T-42"));
        assert_eq!(metadata.get("origin").map(String::as_str), Some("home"));
    }

    #[test]
    fn test_blocks_come_from_view_or_message() {
        let interaction = Interaction::from_value(submission_payload()).unwrap();
        assert_eq!(interaction.blocks().len(), 2);

        let interaction = Interaction::from_value(block_actions_payload()).unwrap();
        assert_eq!(interaction.blocks().len(), 1);
    }

    #[test]
    fn test_find_block_matches_on_containment() {
        let interaction = Interaction::from_value(submission_payload()).unwrap();
        let found = interaction.find_block("name-block").unwrap();
        assert_eq!(found["type"], "input");
        assert!(interaction.find_block("absent").is_none());
    }

    #[test]
    fn test_reconstruct_blocks_through_the_engine() {
        let interaction = Interaction::from_value(submission_payload()).unwrap();
        let list = interaction.reconstruct_blocks().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.has_input_block());
    }

    #[test]
    fn test_action_accessors() {
        let interaction = Interaction::from_value(block_actions_payload()).unwrap();
        assert_eq!(interaction.action_id().unwrap(), "go");
        assert_eq!(interaction.action_value().unwrap(), "clicked");
        assert_eq!(interaction.action_element_type().unwrap(), "button");

        let interaction = Interaction::from_value(submission_payload()).unwrap();
        assert!(matches!(
            interaction.action_id(),
            Err(PayloadError::MissingField("actions"))
        ));
    }

    #[test]
    fn test_submission_state_lookup() {
        let interaction = Interaction::from_value(submission_payload()).unwrap();
        assert_eq!(
            interaction.text_input_value("name-block", "name").unwrap(),
            "Ada"
        );

        let chosen = interaction.select_value("menu-block", "pick").unwrap();
        assert_eq!(
            chosen,
            SelectedOption {
                text: "First".to_string(),
                value: "v1".to_string(),
            }
        );
    }

    #[test]
    fn test_block_actions_state_lookup() {
        let interaction = Interaction::from_value(block_actions_payload()).unwrap();
        let element = interaction.input_value("actions-1", "go").unwrap();
        assert_eq!(element["value"], "clicked");
        assert!(interaction.input_value("actions-1", "stop").is_none());
    }

    #[test]
    fn test_typed_extraction_checks_the_element_type() {
        let interaction = Interaction::from_value(submission_payload()).unwrap();
        let err = interaction.select_value("name-block", "name").unwrap_err();
        assert!(matches!(
            err,
            PayloadError::WrongElementType { expected: "static_select", .. }
        ));

        let err = interaction
            .text_input_value("missing", "name")
            .unwrap_err();
        assert!(matches!(err, PayloadError::MissingInput { .. }));
    }

    #[test]
    fn test_message_interaction_accessors() {
        let interaction = Interaction::from_value(block_actions_payload()).unwrap();
        assert_eq!(interaction.channel_id(), Some("C1"));
        assert_eq!(interaction.channel_name(), Some("general"));
        assert_eq!(interaction.message_ts(), Some("1712.0001"));

        let interaction = Interaction::from_value(submission_payload()).unwrap();
        assert_eq!(interaction.channel_id(), None);
    }

    #[test]
    fn test_from_json() {
        let text = submission_payload().to_string();
        let interaction = Interaction::from_json(&text).unwrap();
        assert!(interaction.is_view_submission());
        assert!(Interaction::from_json("not json").is_err());
    }
}
