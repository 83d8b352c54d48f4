/// Raw notes on the left, refined preview and download on the right.
pub const INDEX_HTML: &str = r###"<!DOCTYPE html>
<html lang="id">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI Note Refiner</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🤖</text></svg>">
<style>
  :root { --accent: #ff4b4b; --muted: #6b7280; --border: #e5e7eb; }
  * { box-sizing: border-box; }
  body { margin: 0; font-family: system-ui, -apple-system, "Segoe UI", sans-serif; color: #111827; }
  header { padding: 1.5rem 2rem 0.5rem; }
  header h1 { margin: 0; }
  header p { margin: 0.25rem 0 0; color: var(--muted); }
  main { display: grid; grid-template-columns: 1fr 1fr; gap: 3rem; padding: 1rem 2rem 2rem; }
  @media (max-width: 900px) { main { grid-template-columns: 1fr; } }
  h2 { margin-top: 0; }
  textarea { width: 100%; height: 400px; padding: 0.75rem; font: inherit; border: 1px solid var(--border); border-radius: 0.5rem; resize: vertical; }
  input[type=password] { width: 100%; padding: 0.5rem 0.75rem; font: inherit; border: 1px solid var(--border); border-radius: 0.5rem; margin-bottom: 0.75rem; }
  button, .download { display: block; width: 100%; margin-top: 0.75rem; padding: 0.6rem; font: inherit; text-align: center; border-radius: 0.5rem; cursor: pointer; text-decoration: none; }
  button { background: var(--accent); color: #fff; border: none; }
  button:disabled { opacity: 0.6; cursor: wait; }
  .download { border: 1px solid var(--border); color: inherit; }
  .notice { padding: 0.75rem 1rem; border-radius: 0.5rem; margin-top: 0.75rem; }
  .notice.info { background: #eff6ff; color: #1e40af; }
  .notice.warning { background: #fffbeb; color: #92400e; }
  .notice.error { background: #fef2f2; color: #991b1b; }
  .spinner { color: var(--muted); margin-top: 0.75rem; }
  #preview { line-height: 1.6; }
  #preview code { background: #f3f4f6; padding: 0 0.25rem; border-radius: 0.25rem; }
  [hidden] { display: none !important; }
</style>
</head>
<body>
<header>
  <h1>✍️ AI Note Refiner</h1>
  <p>Ubah catatan kuliah kasarmu menjadi catatan rapi terstruktur dengan sekali klik!</p>
</header>
<main>
  <section>
    <h2>Catatan Kasar Anda</h2>
    <div id="key-box" hidden>
      <div class="notice info">Untuk menjalankan aplikasi, silakan masukkan Google AI API Key Anda di bawah ini.</div>
      <input id="api-key" type="password" placeholder="Google AI API Key" autocomplete="off" style="margin-top:0.75rem">
    </div>
    <textarea id="notes" placeholder="Tempel catatan kasarmu di sini:" aria-label="Tempel catatan kasarmu di sini:"></textarea>
    <button id="submit" type="button">✨ Rapikan Catatan!</button>
    <div id="spinner" class="spinner" hidden>AI sedang bekerja... Mohon tunggu sebentar...</div>
    <div id="message" class="notice" hidden></div>
  </section>
  <section>
    <h2>Hasil Catatan Rapi</h2>
    <div id="preview"></div>
    <a id="download" class="download" hidden>📥 Unduh File .md</a>
  </section>
</main>
<script>
(function () {
  const $ = (id) => document.getElementById(id);
  let sessionId = sessionStorage.getItem("note-refiner-session");

  function escapeHtml(text) {
    return text.replace(/&/g, "&amp;").replace(/</g, "&lt;").replace(/>/g, "&gt;").replace(/"/g, "&quot;");
  }

  function inline(text) {
    return escapeHtml(text)
      .replace(/`([^`]+)`/g, "<code>$1</code>")
      .replace(/\*\*([^*]+)\*\*/g, "<strong>$1</strong>")
      .replace(/(^|[^*])\*([^*\s][^*]*)\*/g, "$1<em>$2</em>")
      .replace(/_([^_\s][^_]*)_/g, "<em>$1</em>");
  }

  function renderMarkdown(markdown) {
    const out = [];
    const lists = [];
    let paragraph = [];

    const flushParagraph = () => {
      if (paragraph.length) { out.push("<p>" + inline(paragraph.join(" ")) + "</p>"); paragraph = []; }
    };
    const closeLists = (depth) => {
      while (lists.length > depth) { out.push("</li></" + lists.pop().tag + ">"); }
    };

    for (const line of markdown.split(/\r?\n/)) {
      const heading = line.match(/^(#{1,6})\s+(.*)$/);
      const item = line.match(/^(\s*)([-*+]|\d+\.)\s+(.*)$/);
      if (heading) {
        flushParagraph(); closeLists(0);
        const level = heading[1].length;
        out.push("<h" + level + ">" + inline(heading[2]) + "</h" + level + ">");
      } else if (/^\s*(---+|\*\*\*+)\s*$/.test(line)) {
        flushParagraph(); closeLists(0);
        out.push("<hr>");
      } else if (item) {
        flushParagraph();
        const depth = Math.floor(item[1].replace(/\t/g, "    ").length / 2) + 1;
        const tag = /\d/.test(item[2]) ? "ol" : "ul";
        if (lists.length >= depth) {
          closeLists(depth);
          out.push("</li><li>");
        }
        while (lists.length < depth) { out.push("<" + tag + "><li>"); lists.push({ tag }); }
        out.push(inline(item[3]));
      } else if (line.trim() === "") {
        flushParagraph();
      } else {
        if (lists.length) { out.push(" " + inline(line.trim())); }
        else { paragraph.push(line.trim()); }
      }
    }
    flushParagraph(); closeLists(0);
    return out.join("\n");
  }

  function showMessage(text, severity) {
    const box = $("message");
    box.textContent = text;
    box.className = "notice " + severity;
    box.hidden = false;
  }

  function render(snapshot) {
    const note = snapshot.refined;
    $("preview").innerHTML = note ? renderMarkdown(note.content) : "";
    const link = $("download");
    if (note && snapshot.download_file_name) {
      link.href = "/api/sessions/" + encodeURIComponent(snapshot.id) + "/download";
      link.setAttribute("download", snapshot.download_file_name);
      link.hidden = false;
    } else {
      link.hidden = true;
    }
  }

  async function ensureSession() {
    if (sessionId) {
      const res = await fetch("/api/sessions/" + encodeURIComponent(sessionId));
      if (res.ok) { render(await res.json()); return; }
    }
    const res = await fetch("/api/sessions", { method: "POST" });
    const snapshot = await res.json();
    sessionId = snapshot.id;
    sessionStorage.setItem("note-refiner-session", sessionId);
    render(snapshot);
  }

  async function submit() {
    $("message").hidden = true;
    $("submit").disabled = true;
    $("spinner").hidden = false;
    try {
      await ensureSession();
      const keyBox = $("key-box");
      const body = { notes: $("notes").value, api_key: keyBox.hidden ? null : $("api-key").value };
      const res = await fetch("/api/sessions/" + encodeURIComponent(sessionId) + "/refine", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify(body),
      });
      const payload = await res.json();
      if (res.ok) {
        render(payload);
      } else {
        showMessage(payload.error, payload.severity || "error");
        if (payload.code === "SESSION_NOT_FOUND") {
          sessionStorage.removeItem("note-refiner-session");
          sessionId = null;
        } else if (payload.code !== "EMPTY_NOTES" && payload.code !== "MISSING_API_KEY" && payload.code !== "BUSY") {
          render({ id: sessionId, refined: null });
        }
      }
    } catch (err) {
      showMessage("Terjadi kesalahan saat menghubungi AI: " + err, "error");
    } finally {
      $("submit").disabled = false;
      $("spinner").hidden = true;
    }
  }

  $("submit").addEventListener("click", submit);

  window.addEventListener("pagehide", () => {
    if (!sessionId) { return; }
    fetch("/api/sessions/" + encodeURIComponent(sessionId), { method: "DELETE", keepalive: true });
    sessionStorage.removeItem("note-refiner-session");
    sessionId = null;
  });

  fetch("/api/config")
    .then((res) => res.json())
    .then((config) => { $("key-box").hidden = config.has_api_key; })
    .catch(() => { $("key-box").hidden = false; });

  ensureSession().catch((err) => showMessage(String(err), "error"));
})();
</script>
</body>
</html>
"###;
