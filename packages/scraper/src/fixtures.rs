//! Trimmed copies of the legacy page layout used by the unit tests.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::{PageFetcher, ScrapeError};

pub const TITLE_SEARCH: &str = r#"<html><body>
<div id="main">
  <h1 class="findHeader">Results for <span class="findSearchTerm">"the dark knight"</span></h1>
  <div class="findSection">
    <h3 class="findSectionHeader"><a name="tt"></a>Titles</h3>
    <table class="findList">
      <tr class="findResult odd">
        <td class="primary_photo"><a href="/title/tt0468569/?ref_=fn_al_tt_1"><img src="x.jpg" /></a></td>
        <td class="result_text"><a href="/title/tt0468569/?ref_=fn_al_tt_1">The Dark Knight</a> (2008)</td>
      </tr>
      <tr class="findResult even">
        <td class="result_text"><a href="/title/tt1345836/?ref_=fn_al_tt_2">The Dark Knight Rises</a> (2012)</td>
      </tr>
    </table>
  </div>
</div>
</body></html>"#;

pub const TITLE_MAIN: &str = r#"<html><body>
<div class="title_wrapper">
  <h1 class="">The Dark Knight&nbsp;<span id="titleYear">(<a href="/year/2008/?ref_=tt_ov_inf">2008</a>)</span></h1>
  <div class="subtext">
    PG-13
    <span class="ghost">|</span>
    <time datetime="PT152M">
      2h 32min
    </time>
    <span class="ghost">|</span>
    <a href="/search/title?genres=action&amp;explore=title_type,genres">Action</a>
  </div>
</div>
<div class="plot_summary">
  <div class="summary_text">
    When the menace known as the Joker wreaks havoc and chaos on the people of Gotham,
    Batman must accept one of the greatest <i>psychological</i> and physical tests of his ability to fight injustice.
  </div>
</div>
<div class="article" id="titleCast">
  <table class="cast_list">
    <tr><td colspan="4" class="castlist_label">Cast overview, first billed only:</td></tr>
    <tr class="odd">
      <td class="primary_photo"><a href="/name/nm0000288/"><img alt="Christian Bale" /></a></td>
      <td><a href="/name/nm0000288/?ref_=tt_cl_t1"> Christian Bale
</a></td>
      <td class="ellipsis">...</td>
      <td class="character">
        <a href="/title/tt0468569/characters/nm0000288?ref_=tt_cl_t1">Bruce Wayne</a>
      </td>
    </tr>
    <tr class="even">
      <td class="primary_photo"><a href="/name/nm0005132/"><img alt="Heath Ledger" /></a></td>
      <td><a href="/name/nm0005132/?ref_=tt_cl_t2"> Heath Ledger
</a></td>
      <td class="ellipsis">...</td>
      <td class="character">
            Joker
      </td>
    </tr>
    <tr class="odd">
      <td class="primary_photo"><a href="/name/nm0000323/"><img alt="Michael Caine" /></a></td>
      <td><a href="/name/nm0000323/?ref_=tt_cl_t3"> Michael Caine
</a></td>
      <td class="ellipsis">...</td>
      <td class="character">
        <a href="/title/tt0468569/characters/nm0000323?ref_=tt_cl_t3">Alfred</a> /
        <a href="/title/tt0468569/characters/nm0000323?ref_=tt_cl_t3b">Narrator</a>
      </td>
    </tr>
    <tr><td colspan="4" class="castlist_label">Rest of cast listed alphabetically:</td></tr>
    <tr class="even">
      <td class="primary_photo"><a href="/name/nm0000001/"><img alt="Someone Else" /></a></td>
      <td><a href="/name/nm0000001/?ref_=tt_cl_t16"> Someone Else
</a></td>
      <td class="ellipsis">...</td>
      <td class="character">Bystander</td>
    </tr>
  </table>
</div>
<div class="article" id="titleStoryLine">
  <h2>Storyline</h2>
  <div class="inline canwrap">
    <p>
      <span>
        Set within a year after the events of Batman Begins,
        Batman, Lieutenant James Gordon, and new District Attorney Harvey Dent successfully begin to round up the criminals.</span>
    </p>
  </div>
  <div class="see-more inline canwrap">
    <h4 class="inline">Plot Keywords:</h4>
    <a href="/search/keyword?keywords=dc-comics"><span class="itemprop">dc comics</span></a>
  </div>
  <div class="see-more inline canwrap">
    <h4 class="inline">Genres:</h4>
    <a href="/search/title?genres=action&amp;explore=title_type,genres&amp;ref_=tt_stry_gnr"> Action</a>&nbsp;<span>|</span>
    <a href="/search/title?genres=crime&amp;explore=title_type,genres&amp;ref_=tt_stry_gnr"> Crime</a>&nbsp;<span>|</span>
    <a href="/search/title?genres=drama&amp;explore=title_type,genres&amp;ref_=tt_stry_gnr"> Drama</a>&nbsp;<span>|</span>
    <a href="/title/tt0468569/parentalguide">Parents Guide</a>
  </div>
  <div class="txt-block">
    <h4 class="inline">Taglines:</h4>
    Why So Serious?            <span class="see-more inline">
      <a href="/title/tt0468569/taglines?ref_=tt_stry_tg">See more</a>&nbsp;&raquo;
    </span>
  </div>
  <div class="txt-block">
    <h4 class="inline">Motion Picture Rating</h4>
    Rated PG-13 for intense sequences of violence and some menace
  </div>
</div>
</body></html>"#;

pub const TITLE_CREDITS: &str = r#"<html><body>
<div id="fullcredits_content" class="header">
  <h4 name="director" id="director" class="dataHeaderWithBorder">Directed by&nbsp;</h4>
  <table class="simpleTable simpleCreditsTable">
    <tbody>
      <tr>
        <td class="name"><a href="/name/nm0634240/?ref_=ttfc_fc_dr1"> Christopher Nolan
</a></td>
      </tr>
    </tbody>
  </table>
  <h4 name="writer" id="writer" class="dataHeaderWithBorder">Writing Credits <span>(WGA)</span>&nbsp;</h4>
  <table class="simpleTable simpleCreditsTable">
    <tbody>
      <tr>
        <td class="name"><a href="/name/nm0634300/?ref_=ttfc_fc_wr1"> Jonathan Nolan
</a></td>
        <td>...</td>
        <td class="credit">(screenplay) and</td>
      </tr>
      <tr>
        <td class="name"><a href="/name/nm0634240/?ref_=ttfc_fc_wr2"> Christopher Nolan
</a></td>
        <td>...</td>
        <td class="credit">(screenplay) &amp;</td>
      </tr>
      <tr>
        <td class="name"><a href="/name/nm0634240/?ref_=ttfc_fc_wr3"> Christopher Nolan
</a></td>
        <td>...</td>
        <td class="credit">(story) and</td>
      </tr>
      <tr>
        <td class="name"><a href="/name/nm0004170/?ref_=ttfc_fc_wr4"> David S. Goyer
</a></td>
        <td>...</td>
        <td class="credit">(story)</td>
      </tr>
    </tbody>
  </table>
  <h4 name="cast" id="cast" class="dataHeaderWithBorder">Cast</h4>
  <table class="cast_list"><tr><td>ignored</td></tr></table>
  <h4 name="producer" id="producer" class="dataHeaderWithBorder">Produced by&nbsp;</h4>
  <table class="simpleTable simpleCreditsTable">
    <tbody>
      <tr>
        <td class="name"><a href="/name/nm0746273/?ref_=ttfc_fc_pr1"> Kevin De La Noy
</a></td>
        <td>...</td>
        <td class="credit">
            executive producer
        </td>
      </tr>
      <tr>
        <td class="name"><a href="/name/nm0858799/?ref_=ttfc_fc_pr2"> Emma Thomas
</a></td>
        <td>...</td>
        <td class="credit">
            producer
        </td>
      </tr>
    </tbody>
  </table>
</div>
</body></html>"#;

pub const PERSON_SEARCH: &str = r#"<html><body>
<table class="findList">
  <tr class="findResult odd">
    <td class="result_text"><a href="/name/nm0000288/?ref_=fn_al_nm_1">Christian Bale</a> (Actor, The Dark Knight (2008))</td>
  </tr>
</table>
</body></html>"#;

pub const PERSON_MAIN: &str = r#"<html><body>
<table id="name-overview-widget-layout">
  <tr><td>
    <h1 class="header"> <span class="itemprop">Christian Bale</span></h1>
  </td></tr>
</table>
<div id="name-born-info" class="txt-block">
  <h4 class="inline">Born:</h4>
  <time datetime="1974-1-30">
    <a href="/search/name?birth_monthday=01-30">January 30</a>,
    <a href="/search/name?birth_year=1974">1974</a>
  </time>
  in <a href="/search/name?birth_place=Haverfordwest">Haverfordwest, Pembrokeshire, Wales, UK</a>
</div>
</body></html>"#;

pub const PERSON_BIO: &str = r#"<html><body>
<div id="bio_content">
  <h4 class="li_group">Mini Bio (1)</h4>
  <div class="soda odd">
    <p>Christian Charles Philip Bale was born in Pembrokeshire, Wales, UK.<br><br>He first caught the eye of <a href="/name/nm0000229/">Steven Spielberg</a> &amp; won the role.
    </p>
    <p><em>- IMDb Mini Biography By: Anonymous</em></p>
  </div>
</div>
</body></html>"#;

pub const PERSON_AWARDS: &str = r#"<html><body>
<div class="article listo">
  <h1 class="header">Awards</h1>
  <div class="desc">Showing all 62 wins and 100 nominations</div>
  <h3>Academy Awards, USA</h3>
  <table class="awards" style="margin-bottom: 0px">
    <tr>
      <td rowspan="2" class="award_year"><a href="/event/ev0000003/2011?ref_=nm_awd">2011</a></td>
      <td rowspan="1" class="award_outcome"><b>Winner</b><br><span class="award_category">Oscar</span></td>
      <td class="award_description">
        Best Performance by an Actor in a Supporting Role<br>
        <a href="/title/tt0964517/?ref_=nm_awd">The Fighter</a>
        <span class="title_year">(2010)</span>
      </td>
    </tr>
    <tr>
      <td class="award_description">
        Best Ensemble Cast<br>
        <a href="/title/tt0964517/?ref_=nm_awd">The Fighter</a>
        <span class="title_year">(2010)</span>
      </td>
    </tr>
    <tr>
      <td rowspan="1" class="award_year"><a href="/event/ev0000003/2014?ref_=nm_awd">2014</a></td>
      <td rowspan="1" class="award_outcome"><b>Nominee</b><br><span class="award_category">Oscar</span></td>
      <td class="award_description">
        Best Performance by an Actor in a Leading Role<br>
        <a href="/title/tt1800241/?ref_=nm_awd">American Hustle</a>
        <span class="title_year">(2013)</span>
      </td>
    </tr>
  </table>
  <h3>Golden Globes, USA</h3>
  <table class="awards" style="margin-bottom: 0px">
    <tr>
      <td rowspan="1" class="award_year"><a href="/event/ev0000292/2011?ref_=nm_awd">2011</a></td>
      <td rowspan="1" class="award_outcome"><b>Winner</b><br><span class="award_category">Golden Globe</span></td>
      <td class="award_description">
        Best Performance by an Actor in a Supporting Role in a Motion Picture<br>
        <a href="/title/tt0964517/?ref_=nm_awd">The Fighter</a>
        <span class="title_year">(2010)</span>
      </td>
    </tr>
    <tr>
      <td colspan="3" class="award_description">Shared with cast</td>
    </tr>
  </table>
</div>
</body></html>"#;

/// Serves canned bodies keyed by URL and records every request.
pub struct StaticFetcher {
    pages: BTreeMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl StaticFetcher {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, body)| ((*url).to_owned(), (*body).to_owned()))
                .collect(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn title_site() -> Self {
        Self::new(&[
            (
                "https://www.imdb.com/find?q=the+dark+knight&ref_=nv_sr_sm",
                TITLE_SEARCH,
            ),
            ("https://www.imdb.com/title/tt0468569/", TITLE_MAIN),
            (
                "https://www.imdb.com/title/tt0468569/fullcredits?ref_=tt_ql_1",
                TITLE_CREDITS,
            ),
            (
                "https://www.imdb.com/find?q=christian+bale&ref_=nv_sr_sm",
                PERSON_SEARCH,
            ),
            ("https://www.imdb.com/name/nm0000288/", PERSON_MAIN),
            (
                "https://www.imdb.com/name/nm0000288/awards?ref_=nm_ql_2",
                PERSON_AWARDS,
            ),
            (
                "https://www.imdb.com/name/nm0000288/bio?ref_=nm_ov_bio_sm",
                PERSON_BIO,
            ),
        ])
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|u| *u == url).count()
    }
}

impl PageFetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        self.requests.borrow_mut().push(url.to_owned());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::parse(format!("no fixture for {url}")))
    }
}
