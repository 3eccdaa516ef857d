// Signing & recovery benchmarks.
//
// Covers secp256k1 key generation, prehash signing, public-key recovery,
// and signing a full transaction with keyrings of growing size.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use klay_protocol::crypto::hash::keccak256;
use klay_protocol::crypto::keys::PrivateKey;
use klay_protocol::crypto::signatures::{recover_public_key, sign_hash};
use klay_protocol::keyring::Keyring;
use klay_protocol::transaction::signing::sign;
use klay_protocol::transaction::verification::recover_public_keys;
use klay_protocol::transaction::{
    address_hex, Transaction, TransactionFields, TransactionType, U256,
};

fn unsigned(from: &Keyring) -> Transaction {
    TransactionFields::new(TransactionType::FeeDelegatedValueTransferMemo)
        .from(address_hex(from.address()))
        .to("0x7b65b75d204abed71587c9e519a89277766ee1d0")
        .value(1u64)
        .gas(100_000u64)
        .nonce(42u64)
        .gas_price(25_000_000_000u64)
        .chain_id(1001u64)
        .input("0x68656c6c6f")
        .build()
        .unwrap()
}

fn bench_key_generation(c: &mut Criterion) {
    c.bench_function("secp256k1/key_generate", |b| {
        b.iter(PrivateKey::generate);
    });
}

fn bench_sign_hash(c: &mut Criterion) {
    let key = PrivateKey::generate();
    let hash = keccak256(b"value transfer 1 KLAY; nonce=42");
    let chain_id = U256::from(1001u64);

    c.bench_function("secp256k1/sign_hash", |b| {
        b.iter(|| sign_hash(&key, &hash, &chain_id).unwrap());
    });
}

fn bench_recover(c: &mut Criterion) {
    let key = PrivateKey::generate();
    let hash = keccak256(b"value transfer 1 KLAY; nonce=42");
    let chain_id = U256::from(1001u64);
    let signature = sign_hash(&key, &hash, &chain_id).unwrap();

    c.bench_function("secp256k1/recover_public_key", |b| {
        b.iter(|| recover_public_key(&hash, &signature, &chain_id).unwrap());
    });
}

fn bench_sign_transaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("transaction/sign_all_keys");

    for size in [1usize, 3, 10] {
        let keys: Vec<PrivateKey> = (0..size).map(|_| PrivateKey::generate()).collect();
        let address = keys[0].address();
        let keyring = Keyring::multiple(address, keys).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &keyring, |b, keyring| {
            b.iter(|| {
                let mut tx = unsigned(keyring);
                sign(&mut tx, keyring, None).unwrap();
                tx
            });
        });
    }

    group.finish();
}

fn bench_recover_transaction(c: &mut Criterion) {
    let keys: Vec<PrivateKey> = (0..3).map(|_| PrivateKey::generate()).collect();
    let keyring = Keyring::multiple(keys[0].address(), keys).unwrap();
    let mut tx = unsigned(&keyring);
    sign(&mut tx, &keyring, None).unwrap();

    c.bench_function("transaction/recover_three_signers", |b| {
        b.iter(|| recover_public_keys(&tx).unwrap());
    });
}

criterion_group!(
    benches,
    bench_key_generation,
    bench_sign_hash,
    bench_recover,
    bench_sign_transaction,
    bench_recover_transaction,
);
criterion_main!(benches);
