//! Entry page fixtures shaped like KBBI markup.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Wrap a body fragment in the page chrome the upstream site serves.
pub fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>Hasil Pencarian - KBBI Daring</title></head>
<body><div class="container body-content">
{body}
</div></body></html>"#
    )
}

/// `rumah`: one canonical entry with two senses.
pub const RUMAH: &str = r#"<html><body><div class="container body-content">
<h2 style="margin-bottom:3px">ru.mah</h2>
<ol>
<li><font color="red"><i><span title="Nomina: kata benda">n</span></i></font> bangunan untuk tempat tinggal</li>
<li><font color="red"><i><span title="Nomina: kata benda">n</span></i></font> bangunan pada umumnya (seperti gedung)</li>
</ol>
</div></body></html>"#;

/// `rumah` as a single noun sense with the short `n: nomina` annotation.
pub const RUMAH_NOMINA: &str = r#"<html><body><div class="container body-content">
<h2 style="margin-bottom:3px">ru.mah</h2>
<ol>
<li><font color="red"><i><span title="n: nomina">n</span></i></font> bangunan untuk tempat tinggal</li>
</ol>
</div></body></html>"#;

/// `zaman`: canonical entry with an example and an attribution.
pub const ZAMAN: &str = r#"<html><body><div class="container body-content">
<h2 style="margin-bottom:3px">za.man</h2>
<ul class="adjusted-par">
<li><font color="red"><i><span title="Nomina: kata benda">n</span></i></font> jangka waktu yang panjang atau pendek yang menandai sesuatu; masa: <br><font color="grey"><i>zaman batu</i></font></li>
<li><font color="red"><i><span title="Nomina: kata benda">n</span> <span title="Sej: sejarah">Sej</span></i></font> kala; masa</li>
</ul>
</div></body></html>"#;

/// `jaman`: non-canonical spelling pointing at `zaman`.
pub const JAMAN: &str = r#"<html><body><div class="container body-content">
<h2 style="margin-bottom:3px">ja.man</h2>
<ul class="adjusted-par">
<li><font color="red"><i><span title="Nomina: kata benda">n</span></i></font> bentuk tidak baku dari → <a href="/entri/zaman">za.man</a></li>
</ul>
</div></body></html>"#;

/// `bisa`: two homographs.
pub const BISA: &str = r#"<html><body><div class="container body-content">
<h2 style="margin-bottom:3px">bi.sa<sup>1</sup></h2>
<ol>
<li><font color="red"><i><span title="Nomina: kata benda">n</span></i></font> zat racun yang dapat menyebabkan luka</li>
</ol>
<h2 style="margin-bottom:3px">bi.sa<sup>2</sup></h2>
<ol>
<li><font color="red"><i><span title="Adverbia: kata keterangan">adv</span></i></font> mampu (kuasa melakukan sesuatu); dapat</li>
</ol>
</div></body></html>"#;

/// `juang`: precategorial entry listing derived forms.
pub const JUANG: &str = r#"<html><body><div class="container body-content">
<h2 style="margin-bottom:3px">ju.ang</h2>
<font color="darkgreen" title="Prakategorial: kata tidak dipakai dalam bentuk dasarnya">prakategorial</font>: <font color="grey"><a href="/entri/berjuang">berjuang</a>, <a href="/entri/pejuang">pejuang</a>, <a href="/entri/perjuangan">perjuangan</a></font>
</div></body></html>"#;

/// Page served for a word without entries.
pub const NOT_FOUND: &str = r#"<html><body><div class="container body-content">
<h4>Entri tidak ditemukan.</h4>
</div></body></html>"#;

/// A page whose single entry is a cross-reference to `target`.
pub fn cross_reference(label: &str, target: &str) -> String {
    page(&format!(
        r#"<h2 style="margin-bottom:3px">{label}</h2>
<ul class="adjusted-par"><li>bentuk tidak baku dari → <a href="/entri/{target}">{target}</a></li></ul>"#
    ))
}

/// Write a bootstrap word list into `dir` and return its path.
pub fn write_word_list(dir: &Path, words: &[&str]) -> Result<PathBuf> {
    let path = dir.join("words.json");
    let json = serde_json::to_string(words)?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write word list: {}", path.display()))?;
    Ok(path)
}
