//! Byte-exact conformance vectors.
//!
//! Every expected value here was produced by an independent implementation
//! of the same protocol. A mismatch in any of them means hashes, signatures
//! and recovered keys will silently disagree with the chain.

use klay_protocol::crypto::keys::PrivateKey;
use klay_protocol::crypto::signatures::SignatureData;
use klay_protocol::keyring::Keyring;
use klay_protocol::transaction::signing::{
    combine_signed_raw_transactions, sign, sign_as_fee_payer,
};
use klay_protocol::transaction::verification::{
    recover_fee_payer_public_keys, recover_public_keys,
};
use klay_protocol::transaction::{
    address_hex, quantity_hex, Address, Transaction, TransactionError, TransactionFields,
    TransactionType,
};

const SENDER_KEY: &str = "0x45a915e4d060149eb4365960e6a7a45f334393093061116b197e3240065ff2d8";
const FEE_PAYER_KEY: &str = "0xb9d5558443585bca6f225b935950e3f6e69f9da8a5809a83f51c3365dff53936";

const FROM: &str = "0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b";
const TO: &str = "0x7b65B75d204aBed71587c9E519a89277766EE1d0";
const FEE_PAYER: &str = "0x5A0043070275d9f6054307Ee7348bD660849D90f";

fn sig(v: &str, r: &str, s: &str) -> SignatureData {
    SignatureData::from_hex(v, r, s).unwrap()
}

fn hex(bytes: &[u8]) -> String {
    format!("0x{}", ::hex::encode(bytes))
}

// ---------------------------------------------------------------------------
// FeeDelegatedValueTransferMemo
// ---------------------------------------------------------------------------

mod memo {
    use super::*;

    pub const RAW: &str = "0x11f8dc8204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a94a94f5374fce5edbc8e2a8697c15331677e6ebf0b8568656c6c6ff845f84326a064e213aef0167fbd853f8f9989ef5d8b912a77457395ccf13d7f37009edd5c5ba05d0c2e55e4d8734fe2516ed56ac628b74c0eb02aa3b6eda51e1e25a1396093e1945a0043070275d9f6054307ee7348bd660849d90ff845f84326a087390ac14d3c34440b6ddb7b190d3ebde1a07d9a556e5a82ce7e501f24a060f9a037badbcb12cda1ed67b12b1831683a08a3adadee2ea760a07a46bdbb856fea44";

    pub const FEE_PAYER_SIGNED: &str = "0x11f8dc8204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a94a94f5374fce5edbc8e2a8697c15331677e6ebf0b8568656c6c6ff845f84326a064e213aef0167fbd853f8f9989ef5d8b912a77457395ccf13d7f37009edd5c5ba05d0c2e55e4d8734fe2516ed56ac628b74c0eb02aa3b6eda51e1e25a1396093e19433f524631e573329a550296f595c820d6c65213ff845f84325a00a59dd9f258c326e1bbaf1ebb0899a269a78afd70976ca73df257acdcb339faba01935d1df1c174c012a723c7a03b33fffd987499755306d2266f00e888f80bd2c";

    pub fn sender_signature() -> SignatureData {
        sig(
            "0x26",
            "0x64e213aef0167fbd853f8f9989ef5d8b912a77457395ccf13d7f37009edd5c5b",
            "0x5d0c2e55e4d8734fe2516ed56ac628b74c0eb02aa3b6eda51e1e25a1396093e1",
        )
    }

    pub fn fee_payer_signature() -> SignatureData {
        sig(
            "0x26",
            "0x87390ac14d3c34440b6ddb7b190d3ebde1a07d9a556e5a82ce7e501f24a060f9",
            "0x37badbcb12cda1ed67b12b1831683a08a3adadee2ea760a07a46bdbb856fea44",
        )
    }

    pub fn fields() -> TransactionFields {
        TransactionFields::new(TransactionType::FeeDelegatedValueTransferMemo)
            .from(FROM)
            .to(TO)
            .value("0xa")
            .gas("0xf4240")
            .nonce("0x4d2")
            .gas_price("0x19")
            .chain_id("0x1")
            .input("0x68656c6c6f")
    }

    pub fn signed() -> Transaction {
        fields()
            .fee_payer(FEE_PAYER)
            .signatures(vec![sender_signature()])
            .fee_payer_signatures(vec![fee_payer_signature()])
            .build()
            .unwrap()
    }

    /// Sender-signed, waiting for the 0x33f5… fee payer.
    pub fn awaiting_fee_payer() -> Transaction {
        fields()
            .fee_payer("0x33f524631e573329a550296f595c820d6c65213f")
            .signatures(vec![sender_signature()])
            .build()
            .unwrap()
    }
}

#[test]
fn memo_wire_encoding_and_hashes() {
    let tx = memo::signed();
    assert_eq!(tx.raw_transaction().unwrap(), memo::RAW);
    assert_eq!(
        tx.transaction_hash().unwrap(),
        "0x8f68882f6192a53ba470aeca1e83ed9b9e519906a91256724b284dee778b21c9"
    );
    assert_eq!(
        tx.sender_tx_hash().unwrap(),
        "0xfffaa2b38d4e684ea70a89c78fc7b2659000d130c76ad721d68175cbfc77c550"
    );
}

#[test]
fn memo_signing_encodings() {
    let tx = memo::signed();
    assert_eq!(
        hex(&tx.rlp_encoding_for_signature().unwrap()),
        "0xf841b83cf83a118204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a94a94f5374fce5edbc8e2a8697c15331677e6ebf0b8568656c6c6f018080"
    );
    assert_eq!(
        hex(&tx.rlp_encoding_for_fee_payer_signature().unwrap()),
        "0xf856b83cf83a118204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a94a94f5374fce5edbc8e2a8697c15331677e6ebf0b8568656c6c6f945a0043070275d9f6054307ee7348bd660849d90f018080"
    );
}

#[test]
fn memo_integer_inputs_encode_identically() {
    let tx = TransactionFields::new(TransactionType::FeeDelegatedValueTransferMemo)
        .from(FROM)
        .to(TO)
        .value(10u64)
        .gas(1_000_000u64)
        .nonce(1234u64)
        .gas_price(25u64)
        .chain_id(1u64)
        .input("0x68656c6c6f")
        .fee_payer(FEE_PAYER)
        .signatures(vec![memo::sender_signature()])
        .fee_payer_signatures(vec![memo::fee_payer_signature()])
        .build()
        .unwrap();
    assert_eq!(tx.raw_transaction().unwrap(), memo::RAW);
}

#[test]
fn memo_sender_signature_is_reproduced() {
    let sender = Keyring::from_key_str(SENDER_KEY).unwrap();
    let mut tx = memo::fields().fee_payer(FEE_PAYER).build().unwrap();
    sign(&mut tx, &sender, None).unwrap();
    assert_eq!(tx.signatures(), &[memo::sender_signature()]);
}

#[test]
fn memo_sender_signs_with_multiple_and_role_based_keyrings() {
    let sender_key = PrivateKey::from_hex(SENDER_KEY).unwrap();
    let from: Address = FROM.parse().unwrap();

    let multiple =
        Keyring::multiple(from, vec![PrivateKey::generate(), sender_key.clone()]).unwrap();
    let mut tx = memo::fields().build().unwrap();
    sign(&mut tx, &multiple, Some(1)).unwrap();
    assert_eq!(tx.signatures(), &[memo::sender_signature()]);

    let role_based = Keyring::role_based(
        from,
        [
            vec![PrivateKey::generate(), sender_key],
            vec![PrivateKey::generate()],
            vec![PrivateKey::generate()],
        ],
    )
    .unwrap();
    let mut tx = memo::fields().build().unwrap();
    sign(&mut tx, &role_based, Some(1)).unwrap();
    assert_eq!(tx.signatures(), &[memo::sender_signature()]);
}

#[test]
fn memo_fee_payer_signature_with_every_keyring_shape() {
    let fee_key = PrivateKey::from_hex(FEE_PAYER_KEY).unwrap();
    let fee_payer = fee_key.address();

    let keyrings = vec![
        (Keyring::from_private_key(fee_key.clone()), None),
        (
            Keyring::multiple(fee_payer, vec![PrivateKey::generate(), fee_key.clone()]).unwrap(),
            Some(1),
        ),
        (
            Keyring::role_based(
                fee_payer,
                [
                    vec![PrivateKey::generate()],
                    vec![PrivateKey::generate()],
                    vec![PrivateKey::generate(), fee_key.clone()],
                ],
            )
            .unwrap(),
            Some(1),
        ),
    ];

    for (keyring, index) in keyrings {
        let mut tx = memo::awaiting_fee_payer();
        sign_as_fee_payer(&mut tx, &keyring, index).unwrap();
        assert_eq!(tx.raw_transaction().unwrap(), memo::FEE_PAYER_SIGNED);
    }
}

#[test]
fn memo_fee_payer_is_adopted_from_keyring() {
    let keyring = Keyring::from_key_str(FEE_PAYER_KEY).unwrap();
    let mut tx = memo::fields()
        .signatures(vec![memo::sender_signature()])
        .build()
        .unwrap();
    sign_as_fee_payer(&mut tx, &keyring, None).unwrap();
    assert_eq!(tx.raw_transaction().unwrap(), memo::FEE_PAYER_SIGNED);
}

#[test]
fn memo_decode_round_trip() {
    let decoded = Transaction::decode_hex(memo::RAW).unwrap();
    assert_eq!(decoded.tx_type(), TransactionType::FeeDelegatedValueTransferMemo);
    assert_eq!(decoded.input(), Some(&b"hello"[..]));
    assert_eq!(decoded.signatures(), &[memo::sender_signature()]);
    assert_eq!(decoded.fee_payer_signatures(), &[memo::fee_payer_signature()]);
    assert!(decoded.chain_id().is_none());
    assert_eq!(decoded.raw_transaction().unwrap(), memo::RAW);
}

// ---------------------------------------------------------------------------
// FeeDelegatedValueTransferWithRatio
// ---------------------------------------------------------------------------

mod ratio {
    use super::*;

    pub const RAW: &str = "0x0af8d78204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a94a94f5374fce5edbc8e2a8697c15331677e6ebf0b1ef845f84325a0dde32b8241f039a82b124fe94d3e556eb08f0d6f26d07dcc0f3fca621f1090caa01c8c336b358ab6d3a2bbf25de2adab4d01b754e2fb3b9b710069177d54c1e956945a0043070275d9f6054307ee7348bd660849d90ff845f84326a0091ecf53f91bb97bb694f2f2443f3563ac2b646d651497774524394aae396360a044228b88f275aa1ec1bab43681d21dc7e3a676786ed1906f6841d0a1a188f88a";

    pub fn signed() -> Transaction {
        TransactionFields::new(TransactionType::FeeDelegatedValueTransferWithRatio)
            .from(FROM)
            .to(TO)
            .value("0xa")
            .gas("0xf4240")
            .nonce("0x4d2")
            .gas_price("0x19")
            .chain_id("0x1")
            .fee_ratio(30u8)
            .fee_payer(FEE_PAYER)
            .signatures(vec![sig(
                "0x25",
                "0xdde32b8241f039a82b124fe94d3e556eb08f0d6f26d07dcc0f3fca621f1090ca",
                "0x1c8c336b358ab6d3a2bbf25de2adab4d01b754e2fb3b9b710069177d54c1e956",
            )])
            .fee_payer_signatures(vec![sig(
                "0x26",
                "0x091ecf53f91bb97bb694f2f2443f3563ac2b646d651497774524394aae396360",
                "0x44228b88f275aa1ec1bab43681d21dc7e3a676786ed1906f6841d0a1a188f88a",
            )])
            .build()
            .unwrap()
    }
}

#[test]
fn ratio_wire_encoding_and_hashes() {
    let tx = ratio::signed();
    assert_eq!(tx.raw_transaction().unwrap(), ratio::RAW);
    assert_eq!(
        tx.transaction_hash().unwrap(),
        "0x83a89f4debd8e9d6374b987e25132b3a4030c9cf9ace2fc6e7d1086fcea2ce40"
    );
    assert_eq!(
        tx.sender_tx_hash().unwrap(),
        "0x4711ed4023e821425968342c1d50063b6bc3176b1792b7075cfeee3656d450f6"
    );
}

#[test]
fn ratio_signing_encodings() {
    let tx = ratio::signed();
    assert_eq!(
        hex(&tx.rlp_encoding_for_signature().unwrap()),
        "0xf83ab6f50a8204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a94a94f5374fce5edbc8e2a8697c15331677e6ebf0b1e018080"
    );
    assert_eq!(
        hex(&tx.rlp_encoding_for_fee_payer_signature().unwrap()),
        "0xf84fb6f50a8204d219830f4240947b65b75d204abed71587c9e519a89277766ee1d00a94a94f5374fce5edbc8e2a8697c15331677e6ebf0b1e945a0043070275d9f6054307ee7348bd660849d90f018080"
    );
}

#[test]
fn ratio_decode_round_trip() {
    let decoded = Transaction::decode_hex(ratio::RAW).unwrap();
    assert_eq!(decoded.fee_ratio(), Some(30));
    assert_eq!(decoded.raw_transaction().unwrap(), ratio::RAW);
}

// ---------------------------------------------------------------------------
// Recovery: three senders, three fee payers
// ---------------------------------------------------------------------------

mod recovery {
    use super::*;

    pub const SENDER_KEYS: [&str; 3] = [
        "0xfbda4ac2c04336609f7e5a363c71c1565b442d552b82cbd0e75bbabaf215fd28b69ce88a6b9f2a463f1420bd9a0992413254748a7ab46d5ba78d09b35cf0e912",
        "0xa234bd09ea829cb39dd2f5aced2318039f30ce5fe28f5eb28a256bac8617eb5db57ac7683fa21a01c8cbd2ca31c2cf93c97871c73896bf051f9bc0885c87ebe2",
        "0x6ed39def6b25fc001790d267922281483c372b5d2486ae955ece1f1b64b19aea85392c8555947a1c63577439afdb74c77ef07d50520435d31cf4afb3dfe0074f",
    ];

    pub const FEE_PAYER_KEYS: [&str; 3] = [
        "0x2b557d80ddac3a0bbcc8a7861773ca7434c969e2721a574bb94a1e3aa5ceed3819f08a82b31682c038f9f691fb38ee4aaf7e016e2c973a1bd1e48a51f60a54ea",
        "0x1a1cfe1e2ec4b15520c57c20c2460981a2f16003c8db11a0afc282abf929fa1c1868f60f91b330c423aa660913d86acc2a0b1b15e7ba1fe571e5928a19825a7e",
        "0xdea23a89dbbde1a0c26466c49c1edd32785432389641797038c2b53815cb5c73d6cf5355986fd9a22a68bb57b831857fd1636362b383bd632966392714b60d72",
    ];

    pub fn base(tx_type: TransactionType) -> TransactionFields {
        TransactionFields::new(tx_type)
            .from("0x07a9a76ef778676c3bd2b334edcf581db31a85e5")
            .to("0x59177716c34ac6e49e295a0e78e33522f14d61ee")
            .fee_payer("0xb5db72925b1b6b79299a1a49ae226cd7861083ac")
            .value("0x1")
            .gas("0x2faf080")
            .nonce("0x0")
            .gas_price("0x5d21dba00")
            .chain_id("0x7e3")
    }

    pub fn check(tx: &Transaction) {
        let senders: Vec<String> = recover_public_keys(tx)
            .unwrap()
            .iter()
            .map(|k| k.to_hex())
            .collect();
        assert_eq!(senders, SENDER_KEYS);

        let payers: Vec<String> = recover_fee_payer_public_keys(tx)
            .unwrap()
            .iter()
            .map(|k| k.to_hex())
            .collect();
        assert_eq!(payers, FEE_PAYER_KEYS);
    }
}

#[test]
fn memo_recovers_three_and_three_keys() {
    let tx = recovery::base(TransactionType::FeeDelegatedValueTransferMemo)
        .input("0x68656c6c6f")
        .signatures(vec![
            sig(
                "0x0fe9",
                "0xc00f56ab3f8c02b16c720137d96d2eeb0259cba50826d6e173df34388354a232",
                "0x09aedb74fb9e01f8705c8eef6311b8e3f34bade2660bb110f1a73fa3b2782883",
            ),
            sig(
                "0x0fe9",
                "0xba7ced7cb6b115187a6ca7f12b801108e5b90c7a207048b0e8aa70cbcdb72092",
                "0x16beed3e1e075c7898d3adb69ae873b4cbb394a8a90ea5add0ecb34c67561d6f",
            ),
            sig(
                "0x0fe9",
                "0x20527b9a720529e98691351d4522053bd8bce18031142a6dd6026137e3dd41ed",
                "0x72c2a17f9f2795723a41c7bd875bdc5bb1d4e0ca8f3e559d27b33165d73fab09",
            ),
        ])
        .fee_payer_signatures(vec![
            sig(
                "0x0fea",
                "0xa7d87ac3adc04ef6a8fffdfc0f6ab97850b12ab398746c1e440a61e981d23a62",
                "0x4a15edc69d8311e7431cd29b4f4476eff407a1290e8bc7f5f2a314a55de1727f",
            ),
            sig(
                "0x0fea",
                "0x74d1d0b351e47116a74287ee502f4c8281e6170050a6279b3b414ae4a230c610",
                "0x03b43231b264086f4a8592458637c765e124bf091352f4e49647e8497000bd52",
            ),
            sig(
                "0x0fe9",
                "0x675c8961d9c1036bfd1a6f04caf5894f42793c122674f4fd6164a5284f3da2bb",
                "0x4b891e4f9a418115ecf3060157bccb1fa6b734f2f84ab703441c7cac727318b4",
            ),
        ])
        .build()
        .unwrap();
    recovery::check(&tx);
}

#[test]
fn ratio_recovers_three_and_three_keys() {
    let tx = recovery::base(TransactionType::FeeDelegatedValueTransferWithRatio)
        .fee_ratio("0x63")
        .signatures(vec![
            sig(
                "0x0fe9",
                "0x6f9f0e03201564ec8a32c4cbff016a0c85b87f03e274707b21671cdf326c662a",
                "0x77cffd7d2ea37d9a000ccbb68e5976f749ec964074cd68fe6c2c174102f28315",
            ),
            sig(
                "0x0fe9",
                "0xa5e4d1569d1c4bc5a9e0e4fef09b0b5e0224402c486baf5887aede88246eba9f",
                "0x5199e243bef005dc37eefcf144355aaa9687d3f2b0a3535bad4f4c9464c3a609",
            ),
            sig(
                "0x0fea",
                "0x91b1b9ce709a58eda8348070572ded1d42578eb3fdc18907e15e890878609e90",
                "0x16be616510baab5f1b09db15d54debc3fea2a3be8c6f2ff974e4e912ca085ec9",
            ),
        ])
        .fee_payer_signatures(vec![
            sig(
                "0x0fe9",
                "0xdb7685be27d4a207a779e5f9c21aada2b975c84901024ccda9cf3c4f4448c3c3",
                "0x1571b03b29527f991f17ad563558cecd1f1d688fa828020e175b80c2c2383c2c",
            ),
            sig(
                "0x0fe9",
                "0x5750ff286dbc47570ef8930e71f426af4ea5a4d83094af2132d5a218abd82032",
                "0x465f8d1d966693997f09054e66d5250a44751bfa168d4a1ef29908b6620ee4c7",
            ),
            sig(
                "0x0fe9",
                "0x4ec6f1ae409dcdccdccbef67094974a70acc13b01a306fb51cee0ea5f47d3228",
                "0x03ee9a9fe8376ccbacd9adf0d930280900ce1c7c165a334e013cf5de4a83da9d",
            ),
        ])
        .build()
        .unwrap();
    recovery::check(&tx);
}

// ---------------------------------------------------------------------------
// Combine
// ---------------------------------------------------------------------------

mod combine {
    use super::*;

    pub const SINGLE: &str = "0x11f89f018505d21dba00830f4240947b65b75d204abed71587c9e519a89277766ee1d00a941bc5339c6c55380d0da8aaa28e135164ecb862628568656c6c6ff847f845820feaa060a20eed201a2b28bc452b65c699083a6399aaeff2a7572c5c8cf54056254aeaa001586e5321f51ed56da5241d6cc8365bdcade89c4b08d2615bc21231f5e2c26e940000000000000000000000000000000000000000c4c3018080";

    pub const SECOND: &str = "0x11f88b018505d21dba00830f4240947b65b75d204abed71587c9e519a89277766ee1d00a941bc5339c6c55380d0da8aaa28e135164ecb862628568656c6c6ff847f845820fe9a0b8f3ba052cd0ef34b683a3e8ad6f68f71a82d9416bf9732def4b66802967a055a07c241fa9b7d32b72fc8310e886c5b70de262457fd07711cbb2e17217d8c39b2680c4c3018080";

    pub const THIRD: &str = "0x11f88b018505d21dba00830f4240947b65b75d204abed71587c9e519a89277766ee1d00a941bc5339c6c55380d0da8aaa28e135164ecb862628568656c6c6ff847f845820feaa06c301c61b6b8746f63baf57c477bd269ecdeb07d6200a719988bfcd0b7767bc1a016da23b63b4e54ffa16ce8668987e48a76b8e64ba7863359462efd1e8d9838a680c4c3018080";

    pub const MERGED: &str = "0x11f9012d018505d21dba00830f4240947b65b75d204abed71587c9e519a89277766ee1d00a941bc5339c6c55380d0da8aaa28e135164ecb862628568656c6c6ff8d5f845820feaa060a20eed201a2b28bc452b65c699083a6399aaeff2a7572c5c8cf54056254aeaa001586e5321f51ed56da5241d6cc8365bdcade89c4b08d2615bc21231f5e2c26ef845820fe9a0b8f3ba052cd0ef34b683a3e8ad6f68f71a82d9416bf9732def4b66802967a055a07c241fa9b7d32b72fc8310e886c5b70de262457fd07711cbb2e17217d8c39b26f845820feaa06c301c61b6b8746f63baf57c477bd269ecdeb07d6200a719988bfcd0b7767bc1a016da23b63b4e54ffa16ce8668987e48a76b8e64ba7863359462efd1e8d9838a6940000000000000000000000000000000000000000c4c3018080";

    pub const FEE_PAYER_SIGNED: &str = "0x11f89f018505d21dba00830f4240947b65b75d204abed71587c9e519a89277766ee1d00a941bc5339c6c55380d0da8aaa28e135164ecb862628568656c6c6fc4c3018080948d2f6e4986bc55e2d50611149e5725999a763d7cf847f845820feaa0779d20a7958d3131e5ef6a423abb2337e8f120bd0798c47227aee51c70d23c06a07d3c36d5a33cb18e8fec7d1e1f2cfd9a0ec932adee9ad9a090fcd28fafd44392";

    pub fn fields() -> TransactionFields {
        TransactionFields::new(TransactionType::FeeDelegatedValueTransferMemo)
            .from("0x1bc5339c6c55380d0da8aaa28e135164ecb86262")
            .to(TO)
            .value("0xa")
            .input("0x68656c6c6f")
            .gas("0xf4240")
            .nonce("0x1")
            .gas_price("0x5d21dba00")
            .chain_id("0x7e3")
    }

    pub fn first_signature() -> SignatureData {
        sig(
            "0x0fea",
            "0x60a20eed201a2b28bc452b65c699083a6399aaeff2a7572c5c8cf54056254aea",
            "0x01586e5321f51ed56da5241d6cc8365bdcade89c4b08d2615bc21231f5e2c26e",
        )
    }
}

#[test]
fn combine_single_blob_into_unsigned_transaction() {
    let mut tx = combine::fields().build().unwrap();
    let merged = combine_signed_raw_transactions(&mut tx, &[combine::SINGLE]).unwrap();
    assert_eq!(merged, combine::SINGLE);
}

#[test]
fn combine_adopts_nonce_and_gas_price() {
    let mut tx = combine::fields().nonce("0x").gas_price("0x").build().unwrap();
    let merged = combine_signed_raw_transactions(&mut tx, &[combine::SINGLE]).unwrap();
    assert_eq!(merged, combine::SINGLE);
    assert_eq!(tx.nonce().map(quantity_hex).as_deref(), Some("0x1"));
    assert_eq!(tx.gas_price().map(quantity_hex).as_deref(), Some("0x5d21dba00"));
}

#[test]
fn combine_appends_signatures_in_blob_order() {
    let mut tx = combine::fields()
        .signatures(vec![combine::first_signature()])
        .build()
        .unwrap();
    let merged =
        combine_signed_raw_transactions(&mut tx, &[combine::SECOND, combine::THIRD]).unwrap();
    assert_eq!(merged, combine::MERGED);
    assert_eq!(tx.signatures().len(), 3);
    assert_eq!(tx.signatures()[0], combine::first_signature());
}

#[test]
fn combine_adopts_fee_payer_and_its_signatures() {
    let mut tx = combine::fields().build().unwrap();
    let merged = combine_signed_raw_transactions(&mut tx, &[combine::FEE_PAYER_SIGNED]).unwrap();
    assert_eq!(merged, combine::FEE_PAYER_SIGNED);
    assert_eq!(
        tx.fee_payer().map(address_hex).as_deref(),
        Some("0x8d2f6e4986bc55e2d50611149e5725999a763d7c")
    );
}

#[test]
fn combine_rejects_a_different_type() {
    let other = TransactionFields::new(TransactionType::FeeDelegatedValueTransfer)
        .from("0x1bc5339c6c55380d0da8aaa28e135164ecb86262")
        .to(TO)
        .value("0xa")
        .gas("0xf4240")
        .nonce("0x1")
        .gas_price("0x5d21dba00")
        .build()
        .unwrap()
        .raw_transaction()
        .unwrap();

    let mut tx = combine::fields()
        .signatures(vec![combine::first_signature()])
        .build()
        .unwrap();
    match combine_signed_raw_transactions(&mut tx, &[other]) {
        Err(err @ TransactionError::IncompatibleCombine { .. }) => assert_eq!(
            err.to_string(),
            "Transactions containing different information cannot be combined."
        ),
        other => panic!("expected IncompatibleCombine, got {:?}", other),
    }
    assert_eq!(tx.signatures(), &[combine::first_signature()]);
}

#[test]
fn combine_rejects_a_different_nonce() {
    let mut tx = combine::fields().nonce(2u64).build().unwrap();
    match combine_signed_raw_transactions(&mut tx, &[combine::SINGLE]) {
        Err(TransactionError::IncompatibleCombine { field: "nonce" }) => {}
        other => panic!("expected IncompatibleCombine(nonce), got {:?}", other),
    }
    assert!(!tx.is_signed());
}
