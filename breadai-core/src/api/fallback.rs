//! Canned offline answers for the ask endpoint
//!
//! When the backend is unreachable the ask path substitutes one of six fixed
//! answers matched by keyword, so the user always gets text instead of an
//! error sheet.

const SOURDOUGH: &str = "Sourdough is naturally leavened bread raised by a live culture of wild \
yeast and lactic acid bacteria instead of commercial yeast. Feed your starter regularly, keep it \
at room temperature while building it up, and expect a pleasantly tangy crumb from the long \
fermentation.";

const RYE: &str = "Rye flour has far less gluten-forming protein than wheat, so rye breads are \
denser and stickier to handle. Work with wet hands, don't expect a big oven spring, and try a \
touch of caraway - rye and caraway are a classic pairing.";

const GLUTEN: &str = "Gluten is the protein network that gives wheat bread its structure and \
chew. For gluten-free baking, blends of rice, sorghum, and tapioca flour with a binder like \
psyllium husk or xanthan gum give the best texture.";

const RECIPE: &str = "A reliable beginner loaf: 500g bread flour, 350g water, 10g salt, 7g \
instant yeast. Mix, rest an hour, fold, proof until doubled, then bake at 230C for about 35 \
minutes until deep golden and hollow-sounding underneath.";

const HISTORY: &str = "Bread is one of humanity's oldest prepared foods - flatbreads go back \
over 14,000 years, and the Egyptians were baking leavened loaves more than 4,000 years ago. \
Nearly every culture developed its own staple bread, from baguettes to naan to injera.";

const DEFAULT: &str = "I can't reach the bread expert right now, but keep these basics in mind: \
weigh your ingredients, don't rush fermentation, and bake hotter than you think. Try asking \
again in a moment.";

/// Pick the canned answer whose keyword matches the query (case-insensitive)
pub fn canned_answer(query: &str) -> &'static str {
    let query = query.to_lowercase();
    if query.contains("sourdough") {
        SOURDOUGH
    } else if query.contains("rye") {
        RYE
    } else if query.contains("gluten") {
        GLUTEN
    } else if query.contains("recipe") {
        RECIPE
    } else if query.contains("history") {
        HISTORY
    } else {
        DEFAULT
    }
}
