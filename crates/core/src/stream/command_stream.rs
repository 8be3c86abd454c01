use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

use crate::{catalog::Catalog, error::BuildError, stream::Command};

/// Append-only command buffer bound to an airframe catalog.
///
/// Every name-based append resolves through the catalog, so an unknown device or action
/// surfaces as a `BuildError` at the point of emission.
#[derive(Debug, Clone)]
pub struct CommandStream {
    catalog: Arc<Catalog>,
    base_wait_ms: u64,
    commands: Vec<Command>,
}

impl CommandStream {
    pub fn new(catalog: Arc<Catalog>, base_wait_ms: u64) -> Self {
        Self {
            catalog,
            base_wait_ms,
            commands: Vec::new(),
        }
    }

    /// Empty stream sharing this stream's catalog and base wait.
    pub fn child(&self) -> Self {
        Self::new(Arc::clone(&self.catalog), self.base_wait_ms)
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn base_wait_ms(&self) -> u64 {
        self.base_wait_ms
    }

    #[inline]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// `DEVICE.ACTION` labels of every action-like command, in order.
    pub fn labels(&self) -> Vec<String> {
        self.commands.iter().filter_map(Command::label).collect()
    }

    /// Press `action` on `device` with the base wait.
    pub fn add_action(&mut self, device: &str, action: &str) -> Result<(), BuildError> {
        self.add_action_wait(device, action, self.base_wait_ms)
    }

    pub fn add_action_wait(
        &mut self,
        device: &str,
        action: &str,
        wait_ms: u64,
    ) -> Result<(), BuildError> {
        let (dev, code) = self.catalog.resolve(device, action)?;
        self.commands.push(Command::Action {
            device: Arc::from(device),
            action: Arc::from(action),
            dev,
            code,
            dt: wait_ms,
        });
        Ok(())
    }

    pub fn add_actions(&mut self, device: &str, actions: &[&str]) -> Result<(), BuildError> {
        for a in actions {
            self.add_action(device, a)?;
        }
        Ok(())
    }

    /// Press the same control `count` times.
    pub fn add_repeated(
        &mut self,
        device: &str,
        action: &str,
        count: usize,
    ) -> Result<(), BuildError> {
        for _ in 0..count {
            self.add_action(device, action)?;
        }
        Ok(())
    }

    pub fn add_dynamic_action(
        &mut self,
        device: &str,
        action: &str,
        value: f64,
        value2: f64,
    ) -> Result<(), BuildError> {
        let (dev, code) = self.catalog.resolve(device, action)?;
        self.commands.push(Command::Dynamic {
            device: Arc::from(device),
            action: Arc::from(action),
            dev,
            code,
            v: value,
            v2: value2,
        });
        Ok(())
    }

    pub fn add_wait(&mut self, ms: u64) {
        self.commands.push(Command::Wait { dt: ms });
    }

    pub fn add_marker(&mut self, tag: &str) {
        self.commands.push(Command::Marker {
            tag: tag.to_string(),
        });
    }

    pub fn add_exec_function(&mut self, func: &str, args: &[String]) {
        self.commands.push(Command::Exec {
            func: func.to_string(),
            args: args.to_vec(),
        });
    }

    pub fn add_query(&mut self, func: &str, args: &[String], id: u64) {
        self.commands.push(Command::Query {
            func: func.to_string(),
            args: args.to_vec(),
            id,
        });
    }

    /// Type `text` on the device keypad, one key per character.
    pub fn add_text(&mut self, device: &str, text: &str) -> Result<(), BuildError> {
        let dev = self.catalog.device(device)?;
        let keys = text
            .chars()
            .map(|c| dev.keypad_action(c))
            .collect::<Result<Vec<_>, _>>()?;
        for k in keys {
            self.add_action(device, &k)?;
        }
        Ok(())
    }

    /// Type only the ASCII letters/digits of `text` (separators such as `.` or `°` dropped).
    pub fn add_digits(&mut self, device: &str, text: &str) -> Result<(), BuildError> {
        let stripped: String = text.chars().filter(char::is_ascii_alphanumeric).collect();
        self.add_text(device, &stripped)
    }

    /// Open a receiver-evaluated conditional. `EndIf` is emitted when the guard drops.
    pub fn if_block(&mut self, cond: &str, expect: bool, args: &[String]) -> BlockGuard<'_> {
        self.commands.push(Command::If {
            cond: cond.to_string(),
            expect,
            args: args.to_vec(),
        });
        BlockGuard {
            stream: self,
            close: Some(Command::EndIf),
        }
    }

    /// Open a receiver-evaluated loop. `EndWhile` is emitted when the guard drops.
    pub fn while_block(&mut self, cond: &str, args: &[String]) -> BlockGuard<'_> {
        self.commands.push(Command::While {
            cond: cond.to_string(),
            args: args.to_vec(),
        });
        BlockGuard {
            stream: self,
            close: Some(Command::EndWhile),
        }
    }

    /// Splice another stream's commands onto the end of this one.
    pub fn append(&mut self, other: CommandStream) {
        self.commands.extend(other.commands);
    }

    /// Wire text handed to the transport.
    pub fn to_wire(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.commands)
    }
}

/// Scope of an `if`/`while` block. Derefs to the enclosing stream; the close command is
/// appended on drop, whatever path leaves the scope.
pub struct BlockGuard<'a> {
    stream: &'a mut CommandStream,
    close: Option<Command>,
}

impl Deref for BlockGuard<'_> {
    type Target = CommandStream;

    fn deref(&self) -> &CommandStream {
        self.stream
    }
}

impl DerefMut for BlockGuard<'_> {
    fn deref_mut(&mut self) -> &mut CommandStream {
        self.stream
    }
}

impl Drop for BlockGuard<'_> {
    fn drop(&mut self) {
        if let Some(close) = self.close.take() {
            self.stream.commands.push(close);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Device, FIRST_COMMAND_CODE};

    fn stream() -> CommandStream {
        let catalog = Catalog::new("TEST")
            .with_device(Device::new("UFC", 8).with_actions(&["ENT", "DN"]))
            .with_device(Device::new("CDU", 9).with_keypad().with_actions(&["CLR"]));
        CommandStream::new(Arc::new(catalog), 200)
    }

    #[test]
    fn actions_carry_resolved_ids_and_base_wait() {
        let mut s = stream();
        s.add_action("UFC", "DN").unwrap();
        s.add_action_wait("UFC", "ENT", 0).unwrap();
        assert_eq!(
            s.commands()[0],
            Command::Action {
                device: Arc::from("UFC"),
                action: Arc::from("DN"),
                dev: 8,
                code: FIRST_COMMAND_CODE + 1,
                dt: 200,
            }
        );
        assert!(matches!(s.commands()[1], Command::Action { dt: 0, .. }));
    }

    #[test]
    fn failed_resolution_appends_nothing() {
        let mut s = stream();
        assert!(s.add_action("UFC", "NOPE").is_err());
        assert!(s.add_text("CDU", "AB#").is_err());
        assert!(s.is_empty());
    }

    #[test]
    fn digits_strip_separators() {
        let mut s = stream();
        s.add_digits("CDU", "251.000").unwrap();
        assert_eq!(
            s.labels(),
            ["CDU.2", "CDU.5", "CDU.1", "CDU.0", "CDU.0", "CDU.0"]
        );
    }

    #[test]
    fn blocks_close_on_every_exit_path() {
        fn body(s: &mut CommandStream, bail: bool) -> Result<(), BuildError> {
            let mut blk = s.if_block("IsReady", true, &[]);
            blk.add_action("UFC", "ENT")?;
            if bail {
                return Ok(());
            }
            blk.add_action("UFC", "NOPE")?;
            Ok(())
        }

        let mut s = stream();
        body(&mut s, true).unwrap();
        assert_eq!(s.commands().last(), Some(&Command::EndIf));

        let mut s = stream();
        assert!(body(&mut s, false).is_err());
        assert_eq!(s.len(), 3);
        assert_eq!(s.commands().last(), Some(&Command::EndIf));
    }

    #[test]
    fn nested_blocks_close_inside_out() {
        let mut s = stream();
        {
            let mut outer = s.while_block("IsBusy", &["CDU".into()]);
            {
                let mut inner = outer.if_block("IsDirty", false, &[]);
                inner.add_action("CDU", "CLR").unwrap();
            }
            outer.add_wait(50);
        }
        let kinds: Vec<&str> = s
            .commands()
            .iter()
            .map(|c| match c {
                Command::While { .. } => "while",
                Command::If { .. } => "if",
                Command::Action { .. } => "action",
                Command::EndIf => "endif",
                Command::Wait { .. } => "wait",
                Command::EndWhile => "endwhile",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, ["while", "if", "action", "endif", "wait", "endwhile"]);
    }

    #[test]
    fn wire_text_is_a_json_array_of_tagged_commands() {
        let mut s = stream();
        s.add_marker("upload");
        s.add_action_wait("UFC", "ENT", 100).unwrap();
        s.add_query("QueryThing", &["1".into()], 7);
        s.add_wait(10);
        assert_eq!(
            s.to_wire().unwrap(),
            r#"[{"f":"Marker","a":{"tag":"upload"}},{"f":"Action","a":{"dev":8,"code":3001,"dt":100}},{"f":"Query","a":{"func":"QueryThing","args":["1"],"id":7}},{"f":"Wait","a":{"dt":10}}]"#
        );
    }

    #[test]
    fn append_splices_child_streams() {
        let mut parent = stream();
        let mut child = parent.child();
        child.add_action("UFC", "ENT").unwrap();
        parent.add_marker("a");
        parent.append(child);
        assert_eq!(parent.len(), 2);
        assert!(parent.commands()[1].is_action("UFC", "ENT"));
    }
}
