//! Integration tests for the connection lifecycle.
//!
//! Connect, write, drain and disconnect against the in-memory transport.

mod common;

use common::*;

/// Test the basic playback scenario from configuration to disconnect.
#[test]
fn test_playback_scenario() {
    let (mut connection, inspector) = memory_connection(test_config());

    connection.connect().unwrap();

    let data = ramp_bytes(1024);
    assert_eq!(connection.write(&data), Ok(1024));
    assert_eq!(connection.drain(), Ok(()));
    connection.disconnect();

    assert!(!connection.is_connected());
    let session = inspector.last_session().unwrap();
    assert_eq!(session.data, data);
    assert_eq!(session.drains, 1);
    assert!(session.closed);
}

/// Test that reconnecting yields a fresh stream with no data from the first.
#[test]
fn test_reconnect_opens_independent_stream() {
    let (mut connection, inspector) = memory_connection(test_config());

    connection.connect().unwrap();
    connection.write(&ramp_bytes(64)).unwrap();
    connection.drain().unwrap();
    connection.disconnect();

    connection.connect().unwrap();
    assert!(connection.is_connected());

    let sessions = inspector.sessions();
    assert_eq!(sessions.len(), 2);
    assert_ne!(sessions[0].id, sessions[1].id);
    assert!(sessions[0].closed);
    assert!(!sessions[1].closed);
    assert!(sessions[1].data.is_empty());
    assert_eq!(sessions[1].drains, 0);

    connection.write(&[7; 8]).unwrap();
    assert_eq!(inspector.session(0).unwrap().data.len(), 64);
    assert_eq!(inspector.session(1).unwrap().data, vec![7; 8]);
}

/// Test that writes accumulate in order.
#[test]
fn test_consecutive_writes_append() {
    let (mut connection, inspector) = memory_connection(test_config());
    connection.connect().unwrap();

    let data = ramp_bytes(4096);
    for chunk in data.chunks(100) {
        assert_eq!(connection.write(chunk), Ok(chunk.len()));
    }

    assert_eq!(inspector.last_session().unwrap().data, data);
}

/// Test all three directions are accepted by the handshake.
#[test]
fn test_every_direction_connects() {
    for direction in [Direction::Playback, Direction::Record, Direction::Upload] {
        let config = StreamConfig::new("app", direction, "stream");
        let (mut connection, inspector) = memory_connection(config);

        connection.connect().unwrap();
        assert_eq!(inspector.last_session().unwrap().direction, direction);
    }
}

/// Test that a dropped connection never leaks its stream.
#[test]
fn test_no_leak_across_many_sessions() {
    let transport = MemoryTransport::new();
    let inspector = transport.inspector();
    let mut connection = StreamConnection::with_config(transport, test_config());

    for _ in 0..10 {
        connection.connect().unwrap();
        connection.write(&[0; 2]).unwrap();
        connection.disconnect();
    }
    connection.connect().unwrap();
    drop(connection);

    assert_eq!(inspector.sessions().len(), 11);
    assert_eq!(inspector.closes(), 11);
    assert_eq!(inspector.open_streams(), 0);
}

/// Test mutating configuration between sessions takes effect on the next connect.
#[test]
fn test_config_changes_apply_to_next_session() {
    let (mut connection, inspector) = memory_connection(test_config());

    connection.connect().unwrap();
    connection.disconnect();

    connection.set_description("podcast").unwrap();
    connection.set_rate(48000).unwrap();
    connection.set_channels(2).unwrap();
    connection.connect().unwrap();

    let session = inspector.last_session().unwrap();
    assert_eq!(session.description, "podcast");
    assert_eq!(session.sample_spec.rate, 48000);
    assert_eq!(session.sample_spec.channels, 2);
}
