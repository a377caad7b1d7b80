//! Local syslog destination
//!
//! Sends each record as one datagram to the syslog daemon's Unix socket
//! (`/dev/log` by default), facility `user`.

use crate::core::{Destination, LoggerError, Result, Severity};
use std::os::unix::net::UnixDatagram;
use std::path::{Path, PathBuf};

/// Default local syslog socket
pub const DEFAULT_SYSLOG_SOCKET: &str = "/dev/log";

/// `user` facility as defined by RFC 5424
const FACILITY_USER: u8 = 1;

/// Syslog destination writing to a Unix datagram socket
///
/// # Example
///
/// ```no_run
/// use chronicle_logger::destinations::SyslogDestination;
/// use chronicle_logger::prelude::*;
///
/// let syslog = SyslogDestination::new("my-app").expect("syslog socket not available");
/// let logger = Chronicle::builder().destination(syslog).build();
/// logger.always("My App v1.0 starting...");
/// ```
pub struct SyslogDestination {
    socket: Option<UnixDatagram>,
    path: PathBuf,
    ident: String,
    reconnect_on_error: bool,
}

impl SyslogDestination {
    /// Connect to `/dev/log`
    pub fn new(ident: impl Into<String>) -> Result<Self> {
        Self::with_socket(DEFAULT_SYSLOG_SOCKET, ident)
    }

    /// Connect to a custom socket path
    pub fn with_socket(path: impl AsRef<Path>, ident: impl Into<String>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let socket = Self::connect(&path)?;

        Ok(Self {
            socket: Some(socket),
            path,
            ident: ident.into(),
            reconnect_on_error: true,
        })
    }

    /// Enable or disable one reconnection attempt after a failed send
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_reconnect(mut self, enable: bool) -> Self {
        self.reconnect_on_error = enable;
        self
    }

    fn connect(path: &Path) -> Result<UnixDatagram> {
        let socket = UnixDatagram::unbound()?;
        socket.connect(path).map_err(|e| {
            LoggerError::io_operation(
                "connecting to syslog",
                format!("cannot connect to '{}'", path.display()),
                e,
            )
        })?;
        Ok(socket)
    }

    fn frame(&self, severity: Severity, payload: &str) -> String {
        let priority = FACILITY_USER * 8 + severity.syslog_code();
        if self.ident.is_empty() {
            format!("<{}>{}", priority, payload)
        } else {
            format!("<{}>{}: {}", priority, self.ident, payload)
        }
    }

    fn send(&mut self, message: &str) -> Result<()> {
        let socket = self
            .socket
            .as_ref()
            .ok_or_else(|| LoggerError::destination("syslog", "socket not connected"))?;
        socket.send(message.as_bytes())?;
        Ok(())
    }
}

impl Destination for SyslogDestination {
    fn write(&mut self, severity: Severity, payload: &str) -> Result<()> {
        let message = self.frame(severity, payload);

        match self.send(&message) {
            Ok(()) => Ok(()),
            Err(e) if self.reconnect_on_error => {
                self.socket = None;
                self.socket = Some(Self::connect(&self.path)?);
                self.send(&message).map_err(|_| e)
            }
            Err(e) => Err(e),
        }
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "syslog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_frames_reach_socket() -> Result<()> {
        let dir = tempdir()?;
        let socket_path = dir.path().join("log.sock");
        let server = UnixDatagram::bind(&socket_path)?;

        let mut destination = SyslogDestination::with_socket(&socket_path, "chronicle")?;
        destination.write(Severity::Error, r#"{"event":"db down"}"#)?;

        let mut buf = [0u8; 256];
        let n = server.recv(&mut buf)?;
        let received = std::str::from_utf8(&buf[..n]).unwrap();

        // user facility (1) * 8 + err (3)
        assert_eq!(received, r#"<11>chronicle: {"event":"db down"}"#);
        Ok(())
    }

    #[test]
    fn test_frame_without_ident() -> Result<()> {
        let dir = tempdir()?;
        let socket_path = dir.path().join("log.sock");
        let _server = UnixDatagram::bind(&socket_path)?;

        let destination = SyslogDestination::with_socket(&socket_path, "")?;
        assert_eq!(destination.frame(Severity::Info, "{}"), "<14>{}");
        assert_eq!(destination.frame(Severity::Critical, "{}"), "<10>{}");
        Ok(())
    }

    /// Close the daemon's socket and bind a fresh one at the same path
    fn restart_server(server: UnixDatagram, socket_path: &Path) -> Result<UnixDatagram> {
        drop(server);
        std::fs::remove_file(socket_path)?;
        Ok(UnixDatagram::bind(socket_path)?)
    }

    #[test]
    fn test_reconnects_after_daemon_restart() -> Result<()> {
        let dir = tempdir()?;
        let socket_path = dir.path().join("log.sock");
        let server = UnixDatagram::bind(&socket_path)?;

        let mut destination = SyslogDestination::with_socket(&socket_path, "chronicle")?;
        destination.write(Severity::Info, "before")?;

        let server = restart_server(server, &socket_path)?;
        destination.write(Severity::Warning, "after")?;

        let mut buf = [0u8; 256];
        let n = server.recv(&mut buf)?;
        assert_eq!(std::str::from_utf8(&buf[..n]).unwrap(), "<12>chronicle: after");
        Ok(())
    }

    #[test]
    fn test_reconnect_disabled_returns_error() -> Result<()> {
        let dir = tempdir()?;
        let socket_path = dir.path().join("log.sock");
        let server = UnixDatagram::bind(&socket_path)?;

        let mut destination =
            SyslogDestination::with_socket(&socket_path, "chronicle")?.with_reconnect(false);
        let server = restart_server(server, &socket_path)?;

        assert!(destination.write(Severity::Error, "lost").is_err());

        server.set_nonblocking(true)?;
        let mut buf = [0u8; 256];
        let err = server.recv(&mut buf).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::WouldBlock);
        Ok(())
    }

    #[test]
    fn test_missing_socket_is_reported() {
        let dir = tempdir().unwrap();
        let result = SyslogDestination::with_socket(dir.path().join("nope.sock"), "x");
        assert!(matches!(result, Err(LoggerError::IoOperation { .. })));
    }
}
