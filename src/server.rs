use embassy_net::Stack;
use embassy_net::tcp::TcpSocket;
use embassy_time::{Duration, Timer};

use crate::actuator::Actuator;
use crate::app::AppState;
use crate::connection::{Connection, serve_connection};

/// Socket-level bound on every read, write and flush.
pub const SOCKET_TIMEOUT: Duration = Duration::from_secs(10);
/// Pause before listening again after a failed accept.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub const RX_BUFFER_SIZE: usize = 1024;
pub const TX_BUFFER_SIZE: usize = 4096;

impl Connection for TcpSocket<'_> {
    fn close(&mut self) {
        TcpSocket::close(self);
    }
}

/// Accept and serve connections one at a time, forever.
pub async fn serve<A: Actuator>(stack: Stack<'_>, port: u16, app: &mut AppState<'_, A>) -> ! {
    let mut rx_buffer = [0; RX_BUFFER_SIZE];
    let mut tx_buffer = [0; TX_BUFFER_SIZE];

    info!("http: listening on port {}", port);
    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(SOCKET_TIMEOUT));

        if let Err(e) = socket.accept(port).await {
            warn!("http: accept error: {:?}", e);
            Timer::after(ACCEPT_BACKOFF).await;
            continue;
        }
        info!("http: client connected from {:?}", socket.remote_endpoint());

        serve_connection(&mut socket, app).await;
        info!("http: client disconnected");
    }
}
