//! Black-box integration tests exercising only the crate's public API, one
//! module per subsystem.

use sip_protocol::{
    add_blindings, add_commitments, check_stealth_address, commit, decode_stealth_meta_address,
    decrypt_with_viewing_key, derive_stealth_private_key, encode_stealth_meta_address,
    encrypt_for_viewing_key, generate_stealth_address, generate_stealth_meta_address,
    generate_viewing_key, verify_opening,
};

mod commitment {
    use super::*;

    #[test]
    fn commit_and_verify() {
        let c = commit(1000, None).unwrap();
        assert_eq!(c.commitment.len(), 33);
        assert_eq!(c.blinding.len(), 32);
        assert!(verify_opening(&c.commitment, 1000, &c.blinding));
        assert!(!verify_opening(&c.commitment, 1001, &c.blinding));
    }

    #[test]
    fn homomorphic_sum() {
        let c1 = commit(100, None).unwrap();
        let c2 = commit(50, None).unwrap();
        let summed = add_commitments(&c1.commitment, &c2.commitment).unwrap();
        let summed_blinding = add_blindings(&c1.blinding, &c2.blinding);
        assert!(verify_opening(&summed, 150, &summed_blinding));
    }
}

mod stealth {
    use super::*;

    #[test]
    fn round_trip() {
        let (meta, p_spend, p_view) =
            generate_stealth_meta_address("ethereum", None).unwrap();
        let (stealth, _h) = generate_stealth_address(&meta).unwrap();

        assert!(check_stealth_address(&stealth, &p_spend, &p_view));

        let recovery = derive_stealth_private_key(&stealth, &p_spend, &p_view).unwrap();
        let recovered_address = sip_protocol::curve::point_mul(
            &sip_protocol::curve::Point::GENERATOR,
            &sip_protocol::curve::Scalar::from_canonical_bytes(&recovery.private_key).unwrap(),
        )
        .to_compressed();
        assert_eq!(recovered_address, stealth.address);
    }

    #[test]
    fn view_tag_rejection_over_many_addresses() {
        let (meta_a, p_spend_a, p_view_a) =
            generate_stealth_meta_address("ethereum", None).unwrap();
        let (_meta_b, p_spend_b, p_view_b) =
            generate_stealth_meta_address("ethereum", None).unwrap();

        const ADDRESS_COUNT: usize = 1024;
        let mut owner_confirms = 0u32;
        let mut other_confirms = 0u32;

        for _ in 0..ADDRESS_COUNT {
            let (stealth, _h) = generate_stealth_address(&meta_a).unwrap();

            if check_stealth_address(&stealth, &p_spend_a, &p_view_a) {
                owner_confirms += 1;
            }
            if check_stealth_address(&stealth, &p_spend_b, &p_view_b) {
                other_confirms += 1;
            }
        }

        // Every address belongs to A, so A's full check must confirm all of
        // them. B's view tag collides with A's about 1/256 of the time, but
        // full verification (q·G == address) always rejects afterward, so
        // B's confirmations must be exactly zero.
        assert_eq!(owner_confirms, ADDRESS_COUNT as u32);
        assert_eq!(other_confirms, 0);
    }

    #[test]
    fn meta_address_textual_round_trip() {
        let (meta, _p_spend, _p_view) =
            generate_stealth_meta_address("ethereum", Some("primary".to_string())).unwrap();
        let encoded = encode_stealth_meta_address(&meta);
        let decoded = decode_stealth_meta_address(&encoded).unwrap();

        assert_eq!(decoded.spending_public_key, meta.spending_public_key);
        assert_eq!(decoded.viewing_public_key, meta.viewing_public_key);
        assert_eq!(decoded.chain, meta.chain);

        assert!(decode_stealth_meta_address("foo:ethereum:aa:bb").is_err());
    }
}

mod viewing_key {
    use super::*;

    #[test]
    fn aead_round_trip_and_tamper_detection() {
        let vk = generate_viewing_key(Some("audit".to_string())).unwrap();
        let payload = encrypt_for_viewing_key(&vk.key, b"Hello, SIP Protocol!").unwrap();
        let plaintext = decrypt_with_viewing_key(&vk.key, &payload).unwrap();
        assert_eq!(plaintext, b"Hello, SIP Protocol!");

        let mut tampered_bytes = payload.ciphertext.to_bytes().unwrap();
        tampered_bytes[0] ^= 0xff;
        let tampered = sip_protocol::EncryptedPayload {
            nonce: payload.nonce,
            ciphertext: sip_protocol::HexString::from_bytes(&tampered_bytes),
        };
        assert!(decrypt_with_viewing_key(&vk.key, &tampered).is_err());
    }
}
