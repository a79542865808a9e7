use hickory_server::ServerFuture;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use twodns_domain::ServerConfig;
use twodns_infrastructure::dns::DnsServerHandler;

const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn start_dns_server(config: &ServerConfig, handler: DnsServerHandler) -> anyhow::Result<()> {
    let ip: IpAddr = config.bind_address.parse()?;
    let socket_addr = SocketAddr::new(ip, config.dns_port);
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let handler = Arc::new(handler);
    let mut join_set: JoinSet<()> = JoinSet::new();

    let udp_socket = Arc::new(create_udp_socket(domain, socket_addr)?);
    join_set.spawn(run_udp(udp_socket, handler.clone()));

    if config.tcp_enabled {
        let tcp_listener = create_tcp_listener(domain, socket_addr)?;
        join_set.spawn(run_tcp(tcp_listener, (*handler).clone()));
    }

    info!(
        bind_address = %socket_addr,
        tcp = config.tcp_enabled,
        zone = %handler.zone().suffix,
        "DNS server ready"
    );

    while let Some(result) = join_set.join_next().await {
        if let Err(e) = result {
            error!(error = %e, "DNS listener task failed");
        }
    }
    Ok(())
}

async fn run_udp(socket: Arc<UdpSocket>, handler: Arc<DnsServerHandler>) {
    let mut recv_buf = [0u8; 4096];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let handler = handler.clone();
        let socket = socket.clone();
        let query: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        tokio::spawn(async move {
            if let Some(response) = handler.handle_raw_udp(&query) {
                if let Err(e) = socket.send_to(&response, from).await {
                    warn!(client = %from, error = %e, "UDP send error");
                }
            }
        });
    }
}

/// TCP goes through hickory-server, which owns framing and idle timeouts.
async fn run_tcp(listener: TcpListener, handler: DnsServerHandler) {
    let mut server = ServerFuture::new(handler);
    server.register_listener(listener, TCP_IDLE_TIMEOUT);
    if let Err(e) = server.block_until_done().await {
        error!(error = %e, "TCP DNS server error");
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
