use super::{EnvError, Environment};
use game_state::{Command, Observation};
use packets::{DriverReply, DriverRequest};
use std::io::{self, BufReader};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;
use tracing::{debug, warn};

struct Connection {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

/// Talks to an out-of-process game driver (typically something steering a
/// browser) over the line-delimited json protocol in `packets`.
///
/// The connection is opened lazily and dropped on the first i/o failure, so
/// the next `reset` reconnects from scratch.
pub struct RemoteEnv {
    driver_addr: SocketAddr,
    timeout: Duration,
    conn: Option<Connection>,
}

fn describe(reply: &DriverReply) -> String {
    match reply {
        DriverReply::Observation(_) => "an observation".to_owned(),
        DriverReply::Reset { ready } => format!("a reset reply (ready: {ready})"),
    }
}

impl RemoteEnv {
    pub fn new(driver_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            driver_addr,
            timeout,
            conn: None,
        }
    }
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }
    fn connection(&mut self) -> Result<&mut Connection, EnvError> {
        if self.conn.is_none() {
            let stream = TcpStream::connect_timeout(&self.driver_addr, self.timeout)
                .map_err(|e| self.classify(e))?;
            stream.set_read_timeout(Some(self.timeout))?;
            stream.set_write_timeout(Some(self.timeout))?;
            stream.set_nodelay(true)?;
            let reader = BufReader::new(stream.try_clone()?);
            debug!(driver_addr = %self.driver_addr, "connected to driver");
            self.conn = Some(Connection {
                reader,
                writer: stream,
            });
        }
        // just populated above if it was empty
        self.conn.as_mut().ok_or_else(|| {
            EnvError::Io(io::Error::new(io::ErrorKind::NotConnected, "no connection"))
        })
    }
    fn classify(&self, e: io::Error) -> EnvError {
        match e.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => EnvError::Timeout(self.timeout),
            _ => EnvError::Io(e),
        }
    }
    fn send(&mut self, request: &DriverRequest) -> Result<(), EnvError> {
        let result = self
            .connection()
            .and_then(|conn| tcp_io::serialize_into(&conn.writer, request).map_err(EnvError::Io));
        self.drop_on_error(result)
    }
    fn request(&mut self, request: &DriverRequest) -> Result<DriverReply, EnvError> {
        self.send(request)?;
        let result = match self.conn.as_mut() {
            Some(conn) => tcp_io::deserialize_from(&mut conn.reader).map_err(EnvError::Io),
            None => Err(EnvError::Io(io::ErrorKind::NotConnected.into())),
        };
        self.drop_on_error(result)
    }
    fn drop_on_error<T>(&mut self, result: Result<T, EnvError>) -> Result<T, EnvError> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                // a half-read reply would desync every later exchange, so
                // start over with a fresh connection
                self.conn = None;
                Err(match e {
                    EnvError::Io(io_err) => self.classify(io_err),
                    other => other,
                })
            }
        }
    }
}

impl Environment for RemoteEnv {
    fn observe(&mut self) -> Result<Observation, EnvError> {
        match self.request(&DriverRequest::Observe)? {
            DriverReply::Observation(observation) => Ok(observation),
            other => Err(EnvError::UnexpectedReply {
                expected: "an observation",
                got: describe(&other),
            }),
        }
    }
    fn issue(&mut self, command: Command) {
        if let Err(e) = self.send(&DriverRequest::Issue { command }) {
            warn!(?command, error = %e, "could not send command to driver");
        }
    }
    fn reset(&mut self) -> bool {
        match self.request(&DriverRequest::Reset) {
            Ok(DriverReply::Reset { ready }) => ready,
            Ok(other) => {
                warn!(got = %describe(&other), "driver answered reset with the wrong reply");
                false
            }
            Err(e) => {
                warn!(error = %e, "driver reset failed");
                false
            }
        }
    }
}
