fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use peerchunk_protocol::{ChunkMessage, Collector, frame};
    use peerchunk_transfer::{
        Chunk, EndpointQuirk, Fingerprint, Payload, Representation, SizeProfile, chunk_binary,
        chunk_text, decode_base64, encode_base64,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent comparison).
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));
        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  Rust:    {reserialized}"
        );
        parsed
    }

    // --- Fixture tests ---

    #[test]
    fn fixture_binary_chunk_message() {
        let msg: ChunkMessage = roundtrip_test("binary_chunk_message.json");
        assert!(!msg.is_last);
        assert_eq!(msg.to_chunk().unwrap(), Chunk::Binary(b"Hello".to_vec()));
    }

    #[test]
    fn fixture_last_text_chunk_message() {
        let msg: ChunkMessage = roundtrip_test("last_text_chunk_message.json");
        assert!(msg.is_last);
        assert_eq!(msg.index, 2);
        assert_eq!(msg.representation, Representation::Text);
    }

    #[test]
    fn fixture_size_profile() {
        let profile: SizeProfile = roundtrip_test("size_profile.json");
        assert_eq!(profile, SizeProfile::default());
    }

    #[test]
    fn fixture_fingerprint() {
        let fp: Fingerprint = roundtrip_test("fingerprint.json");
        assert!(fp.matches(b"Hello"));
        assert!(!fp.matches(b"Hellp"));
    }

    #[test]
    fn legacy_message_without_is_last() {
        let json = r#"{"transferId":"t","index":0,"representation":"text","data":"QQ=="}"#;
        let msg = ChunkMessage::from_json(json).unwrap();
        assert!(!msg.is_last);
    }

    #[test]
    fn invalid_profile_rejected() {
        let json = r#"{"fileChunkSize":4096,"firefoxFileChunkSize":8192,"textChunkSize":1212}"#;
        assert!(serde_json::from_str::<SizeProfile>(json).is_err());
    }

    // --- End-to-end transfers over an in-memory channel ---

    async fn send_binary(
        data: Vec<u8>,
        profile: SizeProfile,
        quirk: EndpointQuirk,
        tx: tokio::sync::mpsc::Sender<String>,
    ) {
        let limit = profile.limit_for(Representation::Binary, quirk);
        let seq = chunk_binary(&data, limit).unwrap();
        for msg in frame("bin", &seq).unwrap() {
            tx.send(msg.to_json().unwrap()).await.unwrap();
        }
    }

    async fn receive(
        id: &str,
        representation: Representation,
        mut rx: tokio::sync::mpsc::Receiver<String>,
    ) -> Payload {
        let mut collector = Collector::new(id, representation);
        while let Some(wire) = rx.recv().await {
            let msg = ChunkMessage::from_json(&wire).unwrap();
            if let Some(payload) = collector.accept(msg).unwrap() {
                return payload;
            }
        }
        panic!("channel closed before the last chunk");
    }

    #[tokio::test]
    async fn binary_transfer_with_refragmenting_endpoint() {
        let data: Vec<u8> = (0..100_000u32).map(|i| (i * 13 % 256) as u8).collect();
        let fp = Fingerprint::of(&data);
        let (tx, rx) = tokio::sync::mpsc::channel(4);

        let sender = tokio::spawn(send_binary(
            data,
            SizeProfile::default(),
            EndpointQuirk::Refragmenting,
            tx,
        ));
        let payload = receive("bin", Representation::Binary, rx).await;
        sender.await.unwrap();

        assert!(fp.matches(payload.as_binary().unwrap()));
    }

    #[tokio::test]
    async fn text_transfer_with_async_encode() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();
        let fp = Fingerprint::of(&data);
        let (tx, rx) = tokio::sync::mpsc::channel(4);

        let encoded = encode_base64(data).await.unwrap();
        let limit = SizeProfile::default().limit_for(Representation::Text, EndpointQuirk::Conformant);
        let seq = chunk_text(&encoded, limit).unwrap();
        assert_eq!(seq.len(), encoded.len().div_ceil(limit));

        let sender = tokio::spawn(async move {
            for msg in frame("txt", &seq).unwrap() {
                tx.send(msg.to_json().unwrap()).await.unwrap();
            }
        });
        let payload = receive("txt", Representation::Text, rx).await;
        sender.await.unwrap();

        let decoded = decode_base64(payload.as_text().unwrap()).unwrap();
        assert!(fp.matches(&decoded));
    }
}
