//! Builders for TMOD files used by the tests and benches.
#![allow(dead_code)]

use tmod_archive::{compression::compress, integrity::digest};

pub const MOD_NAME: &str = "ExampleMod";
pub const MOD_VERSION: &str = "1.0.2";

pub fn push_string(out: &mut Vec<u8>, value: &str) {
    out.push(value.len() as u8);
    out.extend(value.as_bytes());
}

/// Prepend the TMOD header to `payload`, signing it with its real digest
pub fn seal(version: &str, payload: &[u8]) -> Vec<u8> {
    seal_with_digest(version, digest(payload), payload)
}

pub fn seal_with_digest(version: &str, declared: [u8; 20], payload: &[u8]) -> Vec<u8> {
    let mut out = b"TMOD".to_vec();
    push_string(&mut out, version);
    out.extend(declared);
    out.extend([0x5A; 256]);
    out.extend((payload.len() as u32).to_le_bytes());
    out.extend(payload);
    out
}

/// Inflated body of a legacy archive
pub fn legacy_body(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    push_string(&mut body, MOD_NAME);
    push_string(&mut body, MOD_VERSION);
    body.extend((files.len() as u32).to_le_bytes());
    for (path, data) in files {
        push_string(&mut body, path);
        body.extend((data.len() as u32).to_le_bytes());
        body.extend(*data);
    }
    body
}

pub fn legacy_tmod(version: &str, files: &[(&str, &[u8])]) -> Vec<u8> {
    let packed = compress(&legacy_body(files)).expect("compressing legacy body");
    seal(version, &packed)
}

/// Payload of a modern archive, each file is deflated when that makes it smaller
pub fn modern_payload(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut index = Vec::new();
    let mut data = Vec::new();

    push_string(&mut index, MOD_NAME);
    push_string(&mut index, MOD_VERSION);
    index.extend((files.len() as u32).to_le_bytes());
    for (path, contents) in files {
        let packed = compress(contents).expect("compressing entry");
        let stored = if packed.len() < contents.len() {
            packed
        } else {
            contents.to_vec()
        };

        push_string(&mut index, path);
        index.extend((contents.len() as u32).to_le_bytes());
        index.extend((stored.len() as u32).to_le_bytes());
        data.extend(stored);
    }

    index.extend(data);
    index
}

pub fn modern_tmod(version: &str, files: &[(&str, &[u8])]) -> Vec<u8> {
    seal(version, &modern_payload(files))
}

/// A mix of small and larger, compressible files
pub fn sample_files() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("build.txt", b"displayName = Example Mod\nauthor = someone\n".to_vec()),
        ("Info", vec![0x01, 0x02, 0x03]),
        ("Items/Sword.rawimg", rawimg_2x2()),
        (
            "Localization/en-US.hjson",
            b"Mods: { ExampleMod: { ItemName: { Sword: Sword } } }\n".repeat(20),
        ),
        ("empty.bin", Vec::new()),
    ]
}

pub fn as_refs<P: AsRef<str>>(files: &[(P, Vec<u8>)]) -> Vec<(&str, &[u8])> {
    files.iter().map(|(p, d)| (p.as_ref(), d.as_slice())).collect()
}

/// A 2x2 red, green, blue, yellow raw image
pub fn rawimg_2x2() -> Vec<u8> {
    #[rustfmt::skip]
    let out = vec![
        0x01, 0x00, 0x00, 0x00,
        0x02, 0x00, 0x00, 0x00,
        0x02, 0x00, 0x00, 0x00,
        0xFF, 0x00, 0x00, 0xFF,  0x00, 0xFF, 0x00, 0xFF,
        0x00, 0x00, 0xFF, 0xFF,  0xFF, 0xFF, 0x00, 0xFF,
    ];
    out
}
