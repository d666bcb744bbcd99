pub mod tcp_client;
pub mod test_server;
